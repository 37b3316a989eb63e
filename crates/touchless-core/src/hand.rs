//! Per-hand signal processing: pinch, palm pose, finger counting, gesture
//! classification and temporal smoothing.

use crate::constants::*;
use crate::gesture::{classify_gesture, Gesture};
use crate::landmarks::{Handedness, RawHand};
use glam::{Mat3, Quat, Vec3};
use std::f32::consts::{PI, TAU};

/// Thresholds and filter strength for the hand pipeline.
#[derive(Clone, Debug)]
pub struct TrackingConfig {
    pub pinch_threshold: f32,
    pub thumb_extended_distance: f32,
    /// Blend factor toward the newest frame. 1.0 disables smoothing.
    pub smoothing: f32,
    pub zoom_spread_threshold: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: PINCH_THRESHOLD,
            thumb_extended_distance: THUMB_EXTENDED_DISTANCE,
            smoothing: HAND_SMOOTHING,
            zoom_spread_threshold: ZOOM_SPREAD_THRESHOLD,
        }
    }
}

/// Derived state of one hand for one frame.
#[derive(Clone, Debug)]
pub struct HandData {
    pub handedness: Handedness,
    pub landmarks: [Vec3; LANDMARK_COUNT],
    pub confidence: f32,
    pub is_pinching: bool,
    pub pinch_distance: f32,
    pub pinch_strength: f32,
    pub palm_position: Vec3,
    /// Midpoint between thumb tip and index tip.
    pub pinch_position: Vec3,
    pub orientation: Quat,
    /// Wrist -> index tip angle in the image plane; 0 with the finger pointing up.
    pub roll: f32,
    pub extended_fingers: u8,
    pub gesture: Gesture,
}

#[inline]
pub fn pinch_metrics(distance: f32, threshold: f32) -> (bool, f32) {
    let strength = (1.0 - distance / threshold).clamp(0.0, 1.0);
    (distance < threshold, strength)
}

/// Centroid of the wrist and the four finger MCP joints.
pub fn palm_center(landmarks: &[Vec3; LANDMARK_COUNT]) -> Vec3 {
    let ids = [WRIST, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
    ids.iter().map(|&i| landmarks[i]).sum::<Vec3>() / ids.len() as f32
}

/// Palm rotation from wrist->index-MCP (forward) and pinky-MCP->index-MCP (side).
///
/// Returns identity when the palm is degenerate (collapsed landmarks).
pub fn palm_orientation(wrist: Vec3, index_mcp: Vec3, pinky_mcp: Vec3) -> Quat {
    let forward = index_mcp - wrist;
    let side = index_mcp - pinky_mcp;
    let normal = forward.cross(side);
    if forward.length_squared() < 1e-12 || normal.length_squared() < 1e-12 {
        return Quat::IDENTITY;
    }
    let y = forward.normalize();
    let z = normal.normalize();
    let x = y.cross(z);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Image-plane angle of the wrist -> index tip vector. Image y grows downward.
#[inline]
pub fn hand_roll(wrist: Vec3, index_tip: Vec3) -> f32 {
    let d = index_tip - wrist;
    d.x.atan2(-d.y)
}

pub fn count_extended_fingers(landmarks: &[Vec3; LANDMARK_COUNT], thumb_distance: f32) -> u8 {
    let wrist = landmarks[WRIST];
    let fingers = FINGER_TIP_PIP
        .iter()
        .filter(|(tip, pip)| {
            landmarks[*tip].distance(wrist) > landmarks[*pip].distance(wrist)
        })
        .count() as u8;
    let thumb = landmarks[THUMB_TIP].distance(landmarks[INDEX_MCP]) > thumb_distance;
    fingers + u8::from(thumb)
}

/// Interpolate angles along the shortest arc.
#[inline]
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    from + delta * t
}

pub struct HandProcessor {
    config: TrackingConfig,
}

impl HandProcessor {
    pub fn new(config: TrackingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Measure `raw` and blend it toward `previous` (same hand label, last frame).
    pub fn process(&self, raw: &RawHand, previous: Option<&HandData>) -> HandData {
        let current = self.measure(raw);
        match previous {
            Some(prev) => self.smooth(prev, current),
            None => current,
        }
    }

    /// Unsmoothed measurements for one frame.
    pub fn measure(&self, raw: &RawHand) -> HandData {
        let lm = &raw.landmarks;
        let thumb_tip = lm[THUMB_TIP];
        let index_tip = lm[INDEX_TIP];
        let pinch_distance = thumb_tip.distance(index_tip);
        let (is_pinching, pinch_strength) =
            pinch_metrics(pinch_distance, self.config.pinch_threshold);
        let extended_fingers = count_extended_fingers(lm, self.config.thumb_extended_distance);
        HandData {
            handedness: raw.handedness,
            landmarks: *lm,
            confidence: raw.confidence,
            is_pinching,
            pinch_distance,
            pinch_strength,
            palm_position: palm_center(lm),
            pinch_position: (thumb_tip + index_tip) * 0.5,
            orientation: palm_orientation(lm[WRIST], lm[INDEX_MCP], lm[PINKY_MCP]),
            roll: hand_roll(lm[WRIST], index_tip),
            extended_fingers,
            gesture: classify_gesture(is_pinching, extended_fingers),
        }
    }

    /// Exponential low-pass on the continuous pose; discrete fields come from `current`.
    pub fn smooth(&self, previous: &HandData, current: HandData) -> HandData {
        let t = self.config.smoothing.clamp(0.0, 1.0);
        HandData {
            palm_position: previous.palm_position.lerp(current.palm_position, t),
            pinch_position: previous.pinch_position.lerp(current.pinch_position, t),
            orientation: previous.orientation.slerp(current.orientation, t),
            roll: lerp_angle(previous.roll, current.roll, t),
            ..current
        }
    }
}

impl Default for HandProcessor {
    fn default() -> Self {
        Self::new(TrackingConfig::default())
    }
}
