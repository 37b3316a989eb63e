//! Grab/release state machine shared by the scene controllers.
//!
//! Per object: `Free -> Held(side) -> Free`. An object is grabbed by the nearest
//! pinching hand whose mapped pinch point lies inside the object's capture
//! radius; it stays held by that side for as long as that hand keeps pinching
//! and is released the first frame it doesn't (or disappears). A hand holds at
//! most one object at a time.

use crate::arena::{Arena, EntityId};
use crate::landmarks::Handedness;
use crate::tracking::TrackingState;
use glam::Vec3;
use smallvec::SmallVec;

/// Maps normalized camera coordinates into a scene's world space.
///
/// The camera image is mirrored (x) and y grows downward in image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandMapping {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub offset: Vec3,
}

impl HandMapping {
    #[inline]
    pub fn to_world(&self, p: Vec3) -> Vec3 {
        self.offset
            + Vec3::new(
                (0.5 - p.x) * self.width,
                (0.5 - p.y) * self.height,
                -p.z * self.depth,
            )
    }

    /// Inverse of [`HandMapping::to_world`] in x/y, with z = 0.
    pub fn to_normalized(&self, world: Vec3) -> Vec3 {
        let local = world - self.offset;
        Vec3::new(0.5 - local.x / self.width, 0.5 - local.y / self.height, 0.0)
    }
}

impl Default for HandMapping {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 12.0,
            depth: 10.0,
            offset: Vec3::ZERO,
        }
    }
}

/// One hand expressed in scene space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    pub side: Handedness,
    pub pinch: Vec3,
    pub palm: Vec3,
    pub pinching: bool,
    pub roll: f32,
}

impl HandPose {
    pub fn collect(tracking: &TrackingState, mapping: &HandMapping) -> SmallVec<[HandPose; 2]> {
        tracking
            .hands()
            .map(|h| HandPose {
                side: h.handedness,
                pinch: mapping.to_world(h.pinch_position),
                palm: mapping.to_world(h.palm_position),
                pinching: h.is_pinching,
                roll: h.roll,
            })
            .collect()
    }
}

pub trait Grabbable {
    fn position(&self) -> Vec3;
    fn capture_radius(&self) -> f32;
    fn held_by(&self) -> Option<Handedness>;
    fn set_held_by(&mut self, side: Option<Handedness>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldEvent {
    Grabbed { id: EntityId, side: Handedness },
    Released { id: EntityId, side: Handedness },
}

/// Advance every object's hold state by one frame.
pub fn update_holds<T: Grabbable>(
    arena: &mut Arena<T>,
    poses: &[HandPose],
) -> SmallVec<[HoldEvent; 4]> {
    let mut events = SmallVec::new();
    let pose_for = |side: Handedness| poses.iter().find(|p| p.side == side);

    let mut busy = [false; 2];
    for (id, item) in arena.iter_mut() {
        if let Some(side) = item.held_by() {
            if pose_for(side).is_some_and(|p| p.pinching) {
                busy[side.index()] = true;
            } else {
                item.set_held_by(None);
                events.push(HoldEvent::Released { id, side });
            }
        }
    }

    let mut candidates: SmallVec<[(f32, Handedness, EntityId); 8]> = SmallVec::new();
    for pose in poses.iter().filter(|p| p.pinching && !busy[p.side.index()]) {
        for (id, item) in arena.iter() {
            if item.held_by().is_some() {
                continue;
            }
            let d = item.position().distance(pose.pinch);
            if d <= item.capture_radius() {
                candidates.push((d, pose.side, id));
            }
        }
    }
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (_, side, id) in candidates {
        if busy[side.index()] {
            continue;
        }
        if let Some(item) = arena.get_mut(id) {
            if item.held_by().is_none() {
                item.set_held_by(Some(side));
                busy[side.index()] = true;
                events.push(HoldEvent::Grabbed { id, side });
            }
        }
    }
    events
}
