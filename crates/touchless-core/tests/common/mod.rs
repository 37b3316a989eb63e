// Synthetic hands shared by the host-side tests.

#![allow(dead_code)]

use glam::Vec3;
use touchless_core::{
    aggregate, classify_gesture, CombinedGesture, HandData, Handedness, RawHand, TrackingState,
    INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
    ZOOM_SPREAD_THRESHOLD,
};

pub const OPEN: [bool; 5] = [true; 5];
pub const CLOSED: [bool; 5] = [false; 5];

/// 21 image-space landmarks for an upright hand whose MCP row sits at
/// `(cx, cy)`. `fingers` is thumb..pinky; `pinch` puts the thumb tip next to
/// the index tip. `angle` rotates the whole hand about the wrist (clockwise on
/// screen, which is positive roll).
pub fn landmarks(cx: f32, cy: f32, fingers: [bool; 5], pinch: bool, angle: f32) -> Vec<Vec3> {
    let wrist = Vec3::new(cx, cy + 0.15, 0.0);
    let mut lm = vec![Vec3::ZERO; LANDMARK_COUNT];
    lm[WRIST] = wrist;
    for (k, ox) in [-0.04, -0.013, 0.013, 0.04].into_iter().enumerate() {
        let mcp = Vec3::new(cx + ox, cy, 0.0);
        let base = 5 + 4 * k;
        lm[base] = mcp;
        let offsets = if fingers[k + 1] {
            [-0.04, -0.07, -0.10]
        } else {
            [-0.03, -0.01, 0.02]
        };
        for (j, dy) in offsets.into_iter().enumerate() {
            lm[base + 1 + j] = mcp + Vec3::new(0.0, dy, 0.0);
        }
    }
    let thumb_tip = if pinch {
        lm[INDEX_TIP] + Vec3::new(0.01, 0.0, 0.0)
    } else if fingers[0] {
        lm[INDEX_MCP] + Vec3::new(-0.15, 0.0, 0.0)
    } else {
        lm[INDEX_MCP] + Vec3::new(0.06, 0.03, 0.0)
    };
    lm[THUMB_TIP] = thumb_tip;
    lm[THUMB_CMC] = wrist.lerp(thumb_tip, 0.25);
    lm[THUMB_MCP] = wrist.lerp(thumb_tip, 0.5);
    lm[THUMB_IP] = wrist.lerp(thumb_tip, 0.75);

    let (s, c) = angle.sin_cos();
    for p in lm.iter_mut() {
        let o = *p - wrist;
        *p = wrist + Vec3::new(o.x * c - o.y * s, o.x * s + o.y * c, o.z);
    }
    lm
}

pub fn raw(side: Handedness, cx: f32, cy: f32, fingers: [bool; 5], pinch: bool) -> RawHand {
    RawHand::new(side, &landmarks(cx, cy, fingers, pinch, 0.0), 0.9).unwrap()
}

/// Hand state with only the fields scenes read filled in meaningfully.
pub fn hand(side: Handedness, pinch: Vec3, pinching: bool, roll: f32, fingers: u8) -> HandData {
    HandData {
        handedness: side,
        landmarks: [Vec3::ZERO; LANDMARK_COUNT],
        confidence: 1.0,
        is_pinching: pinching,
        pinch_distance: if pinching { 0.01 } else { 0.2 },
        pinch_strength: if pinching { 0.8 } else { 0.0 },
        palm_position: pinch,
        pinch_position: pinch,
        orientation: Default::default(),
        roll,
        extended_fingers: fingers,
        gesture: classify_gesture(pinching, fingers),
    }
}

pub fn state(left: Option<HandData>, right: Option<HandData>) -> TrackingState {
    let (gesture, strength) = aggregate(left.as_ref(), right.as_ref(), ZOOM_SPREAD_THRESHOLD);
    TrackingState {
        left,
        right,
        gesture,
        strength,
        frame: 1,
    }
}

pub fn right_only(h: HandData) -> TrackingState {
    state(None, Some(h))
}

pub fn zoom_state(spread: f32) -> TrackingState {
    let l = hand(Handedness::Left, Vec3::new(0.5 - spread * 0.5, 0.5, 0.0), false, 0.0, 5);
    let r = hand(Handedness::Right, Vec3::new(0.5 + spread * 0.5, 0.5, 0.0), false, 0.0, 5);
    let s = state(Some(l), Some(r));
    assert_eq!(s.gesture, CombinedGesture::Zoom);
    s
}
