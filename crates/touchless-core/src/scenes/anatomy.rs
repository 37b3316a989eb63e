//! Beating heart with a surgical needle.
//!
//! Either part can be pinched. While the heart is free, one open hand spins it
//! and two open hands set its size. The heartbeat is a sum of sinusoids layered
//! on top of the gesture-driven scale.

use super::{push_hand_markers, rgba, SceneController, SceneKind};
use crate::arena::{Arena, EntityId};
use crate::constants::*;
use crate::gesture::CombinedGesture;
use crate::grab::{update_holds, Grabbable, HandMapping, HandPose, HoldEvent};
use crate::hand::lerp_angle;
use crate::landmarks::Handedness;
use crate::mesh::MeshKind;
use crate::snapshot::{Camera, SceneSnapshot};
use crate::tracking::TrackingState;
use glam::{Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartKind {
    Heart,
    Needle,
}

#[derive(Clone, Debug)]
pub struct Part {
    pub kind: PartKind,
    pub position: Vec3,
    pub rotation: Quat,
    pub held_by: Option<Handedness>,
}

impl Part {
    fn new(kind: PartKind, position: Vec3) -> Self {
        Self { kind, position, rotation: Quat::IDENTITY, held_by: None }
    }
}

impl Grabbable for Part {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn capture_radius(&self) -> f32 {
        match self.kind {
            PartKind::Heart => HEART_CAPTURE_RADIUS,
            PartKind::Needle => NEEDLE_CAPTURE_RADIUS,
        }
    }

    fn held_by(&self) -> Option<Handedness> {
        self.held_by
    }

    fn set_held_by(&mut self, side: Option<Handedness>) {
        self.held_by = side;
    }
}

/// Where the heart is easing towards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartTarget {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for HeartTarget {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Quat::IDENTITY, scale: 1.0 }
    }
}

/// Heartbeat multiplier at time `t` seconds.
pub fn heartbeat(t: f32) -> f32 {
    1.0 + HEARTBEAT_HARMONICS
        .iter()
        .map(|&(hz, amp, phase)| amp * (TAU * hz * t + phase).sin())
        .sum::<f32>()
}

/// Small deterministic hand tremor, different per axis.
fn tremor(t: f32) -> Vec3 {
    NEEDLE_TREMOR_AMPLITUDE
        * Vec3::new((t * 37.0).sin(), (t * 41.0 + 1.0).sin(), (t * 29.0 + 2.0).sin() * 0.5)
}

pub struct AnatomyScene {
    parts: Arena<Part>,
    heart: EntityId,
    needle: EntityId,
    target: HeartTarget,
    scale: f32,
    needle_roll: f32,
    in_tissue: bool,
    mapping: HandMapping,
    poses: SmallVec<[HandPose; 2]>,
    gesture: CombinedGesture,
    time: f32,
}

impl AnatomyScene {
    pub fn new() -> Self {
        let mut parts = Arena::new();
        let heart = parts.insert("heart", Part::new(PartKind::Heart, Vec3::ZERO));
        let needle = parts.insert("needle", Part::new(PartKind::Needle, NEEDLE_REST));
        Self {
            parts,
            heart,
            needle,
            target: HeartTarget::default(),
            scale: 1.0,
            needle_roll: 0.0,
            in_tissue: false,
            mapping: HandMapping { depth: 0.0, ..HandMapping::default() },
            poses: SmallVec::new(),
            gesture: CombinedGesture::None,
            time: 0.0,
        }
    }

    pub fn mapping(&self) -> &HandMapping {
        &self.mapping
    }

    pub fn heart(&self) -> &Part {
        &self.parts[self.heart]
    }

    pub fn needle(&self) -> &Part {
        &self.parts[self.needle]
    }

    pub fn target(&self) -> &HeartTarget {
        &self.target
    }

    /// Gesture-driven scale, without the heartbeat.
    pub fn heart_scale(&self) -> f32 {
        self.scale
    }

    /// Scale actually drawn this frame.
    pub fn beating_scale(&self) -> f32 {
        self.scale * heartbeat(self.time)
    }

    pub fn needle_tip(&self) -> Vec3 {
        let n = self.needle();
        n.position + n.rotation * (Vec3::NEG_Y * NEEDLE_LENGTH * 0.5)
    }

    pub fn needle_in_tissue(&self) -> bool {
        self.in_tissue
    }

    fn apply_holds(&mut self, events: &[HoldEvent]) {
        for event in events {
            match *event {
                HoldEvent::Grabbed { id, side } => {
                    log::info!("[scene] {side} hand grabbed {:?}", self.parts[id].kind);
                }
                HoldEvent::Released { id, side } => {
                    let part = &mut self.parts[id];
                    log::info!("[scene] {side} hand released {:?}", part.kind);
                    part.rotation = Quat::IDENTITY;
                    match part.kind {
                        PartKind::Heart => {
                            self.target.rotation = Quat::IDENTITY;
                            self.target.position = part.position;
                        }
                        PartKind::Needle => self.needle_roll = 0.0,
                    }
                }
            }
        }
    }

    fn pose(&self, side: Handedness) -> Option<HandPose> {
        self.poses.iter().find(|p| p.side == side).copied()
    }

    fn follow_needle(&mut self) {
        let needle = &self.parts[self.needle];
        let Some(pose) = needle.held_by.and_then(|s| self.pose(s)) else { return };
        self.needle_roll = lerp_angle(self.needle_roll, pose.roll, HOLD_ROLL_LERP);
        let goal = pose.pinch + tremor(self.time);
        let needle = &mut self.parts[self.needle];
        needle.position = needle.position.lerp(goal, HOLD_FOLLOW_LERP);
        needle.rotation = Quat::from_rotation_z(self.needle_roll);
    }

    fn steer_heart(&mut self, tracking: &TrackingState, dt: f32) {
        if let Some(pose) = self.parts[self.heart].held_by.and_then(|s| self.pose(s)) {
            self.target.position = pose.pinch;
            self.target.rotation = Quat::from_rotation_z(pose.roll * HEART_HELD_DAMPING);
            return;
        }
        match tracking.gesture {
            CombinedGesture::Rotate => {
                if let Some(hand) = tracking.primary() {
                    let dx = hand.palm_position.x - 0.5;
                    let dy = hand.palm_position.y - 0.5;
                    let spin = Quat::from_rotation_y(-dx * HEART_ROTATE_RATE * dt)
                        * Quat::from_rotation_x(dy * HEART_ROTATE_RATE * dt);
                    self.target.rotation = (spin * self.target.rotation).normalize();
                }
            }
            CombinedGesture::Zoom => {
                self.target.scale = (tracking.strength * HEART_ZOOM_PER_SPREAD)
                    .clamp(HEART_SCALE_MIN, HEART_SCALE_MAX);
            }
            _ => {}
        }
        if tracking.is_empty() {
            self.target.position = Vec3::ZERO;
            self.target.scale = 1.0;
            self.target.rotation =
                (Quat::from_rotation_y(HEART_AMBIENT_SPIN * dt) * self.target.rotation).normalize();
        }
    }

    fn ease_heart(&mut self) {
        let target = self.target;
        let heart = &mut self.parts[self.heart];
        heart.position = heart.position.lerp(target.position, HEART_FOLLOW_LERP);
        heart.rotation = heart.rotation.slerp(target.rotation, HEART_FOLLOW_LERP);
        self.scale += (target.scale - self.scale) * HEART_FOLLOW_LERP;
    }

    fn update_contact(&mut self) {
        let reach = HEART_RADIUS * self.beating_scale();
        let inside = self.needle_tip().distance(self.heart().position) < reach;
        if inside != self.in_tissue {
            self.in_tissue = inside;
            log::debug!("[scene] needle {}", if inside { "entered tissue" } else { "withdrawn" });
        }
    }
}

impl Default for AnatomyScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneController for AnatomyScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Anatomy
    }

    fn update(&mut self, tracking: &TrackingState, dt: f32) {
        self.time += dt;
        self.gesture = tracking.gesture;
        self.poses = HandPose::collect(tracking, &self.mapping);

        let events = update_holds(&mut self.parts, &self.poses);
        self.apply_holds(&events);
        self.follow_needle();
        self.steer_heart(tracking, dt);
        self.ease_heart();
        self.update_contact();
    }

    fn snapshot(&self) -> SceneSnapshot {
        let mut snap = SceneSnapshot::new(
            Camera::looking_at(ANATOMY_CAMERA_EYE, Vec3::ZERO),
            CLEAR_COLOR_ANATOMY,
        );

        let heart = self.heart();
        let s = HEART_RADIUS * self.beating_scale();
        let flesh = if self.in_tissue {
            Vec3::new(0.95, 0.25, 0.3)
        } else {
            Vec3::new(0.75, 0.12, 0.15)
        };
        let place = |offset: Vec3| heart.position + heart.rotation * (offset * s);
        // ventricles, two atria, aorta
        snap.push(
            MeshKind::Sphere,
            Vec3::new(0.9, 1.0, 0.8) * s,
            heart.rotation,
            place(Vec3::new(0.0, -0.15, 0.0)),
            rgba(flesh, 1.0),
        );
        for x in [-0.4, 0.4] {
            snap.push(
                MeshKind::Sphere,
                Vec3::splat(0.5 * s),
                heart.rotation,
                place(Vec3::new(x, 0.6, 0.0)),
                rgba(flesh * 0.9, 1.0),
            );
        }
        snap.push(
            MeshKind::Cylinder,
            Vec3::new(0.18, 0.6, 0.18) * s,
            heart.rotation,
            place(Vec3::new(0.1, 1.05, 0.0)),
            rgba(Vec3::new(0.85, 0.3, 0.35), 1.0),
        );

        let needle = self.needle();
        snap.push(
            MeshKind::Cylinder,
            Vec3::new(0.04, NEEDLE_LENGTH, 0.04),
            needle.rotation,
            needle.position,
            [0.85, 0.88, 0.92, 1.0],
        );
        snap.push(
            MeshKind::Cube,
            Vec3::new(0.25, 0.5, 0.25),
            needle.rotation,
            needle.position + needle.rotation * Vec3::new(0.0, NEEDLE_LENGTH * 0.5, 0.0),
            [0.2, 0.45, 0.8, 1.0],
        );

        push_hand_markers(&mut snap, &self.poses);
        snap.status = format!(
            "{} | scale {:.2}{}",
            self.gesture,
            self.scale,
            if self.in_tissue { " | needle in tissue" } else { "" }
        );
        snap
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
