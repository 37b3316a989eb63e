//! The three scene controllers.
//!
//! Each scene owns its entities, reads the latest [`TrackingState`] once per
//! rendered frame, mutates its own arena and describes the result as a
//! [`SceneSnapshot`]. Scenes share nothing with each other.

pub mod anatomy;
pub mod chemistry;
pub mod solar;

pub use anatomy::AnatomyScene;
pub use chemistry::ChemistryLab;
pub use solar::SolarSystem;

use crate::constants::{HAND_MARKER_COLOR, HAND_MARKER_PINCH_COLOR};
use crate::grab::HandPose;
use crate::mesh::MeshKind;
use crate::snapshot::SceneSnapshot;
use crate::tracking::TrackingState;
use glam::{Quat, Vec3};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Solar,
    Anatomy,
    Chemistry,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [SceneKind::Solar, SceneKind::Anatomy, SceneKind::Chemistry];

    pub fn as_str(self) -> &'static str {
        match self {
            SceneKind::Solar => "solar",
            SceneKind::Anatomy => "anatomy",
            SceneKind::Chemistry => "chemistry",
        }
    }

    /// Mount a fresh controller for this scene.
    pub fn create(self) -> Box<dyn SceneController> {
        match self {
            SceneKind::Solar => Box::new(SolarSystem::new()),
            SceneKind::Anatomy => Box::new(AnatomyScene::new()),
            SceneKind::Chemistry => Box::new(ChemistryLab::new()),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait SceneController {
    fn kind(&self) -> SceneKind;

    /// Advance one rendered frame. `dt` is in seconds.
    fn update(&mut self, tracking: &TrackingState, dt: f32);

    fn snapshot(&self) -> SceneSnapshot;

    /// Restore the scene's initial entities.
    fn reset(&mut self);
}

/// Small spheres where each tracked hand's pinch point maps into the scene.
pub(crate) fn push_hand_markers(snapshot: &mut SceneSnapshot, poses: &[HandPose]) {
    for pose in poses {
        let (color, size) = if pose.pinching {
            (HAND_MARKER_PINCH_COLOR, 0.22)
        } else {
            (HAND_MARKER_COLOR, 0.15)
        };
        snapshot.push(
            MeshKind::Sphere,
            Vec3::splat(size),
            Quat::IDENTITY,
            pose.pinch,
            color,
        );
    }
}

#[inline]
pub(crate) fn rgba(c: Vec3, a: f32) -> [f32; 4] {
    [c.x, c.y, c.z, a]
}
