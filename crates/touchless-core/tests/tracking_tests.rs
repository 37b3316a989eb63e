// Host-side tests for landmark decoding, the hand tracker, two-hand
// aggregation and the shared latest-value cell.

mod common;

use common::*;
use glam::Vec3;
use touchless_core::*;

fn flatten(hands: &[Vec<Vec3>]) -> Vec<f32> {
    hands
        .iter()
        .flat_map(|h| h.iter().flat_map(|p| [p.x, p.y, p.z]))
        .collect()
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn decodes_two_hands_from_flat_payload() {
    let flat = flatten(&[
        landmarks(0.3, 0.5, OPEN, false, 0.0),
        landmarks(0.7, 0.5, CLOSED, false, 0.0),
    ]);
    let out = decode_hands(&flat, &labels(&["Left", "right"]), &[0.8, 0.95]);
    assert_eq!(out.len(), 2);
    let left = out[0].as_ref().unwrap();
    let right = out[1].as_ref().unwrap();
    assert_eq!(left.handedness, Handedness::Left);
    assert_eq!(right.handedness, Handedness::Right);
    assert!((right.confidence - 0.95).abs() < 1e-6);
    assert!((left.point(WRIST).x - 0.3).abs() < 1e-6);
}

#[test]
fn short_hand_is_rejected_alone() {
    let mut flat = flatten(&[landmarks(0.3, 0.5, OPEN, false, 0.0)]);
    flat.extend_from_slice(&[0.5; 30]);
    let out = decode_hands(&flat, &labels(&["Left", "Right"]), &[]);
    assert!(out[0].is_ok());
    assert_eq!(out[0].as_ref().unwrap().confidence, 1.0);
    assert_eq!(
        out[1].as_ref().unwrap_err(),
        &TrackingError::IncompleteHand { found: 10, expected: LANDMARK_COUNT }
    );
}

#[test]
fn unlabelled_landmarks_report_mismatch() {
    let flat = flatten(&[
        landmarks(0.3, 0.5, OPEN, false, 0.0),
        landmarks(0.7, 0.5, OPEN, false, 0.0),
    ]);
    let out = decode_hands(&flat, &labels(&["Left"]), &[0.9]);
    assert_eq!(out.len(), 2);
    assert!(out[0].is_ok());
    assert!(matches!(
        out[1],
        Err(TrackingError::PayloadMismatch { hands: 2, labels: 1 })
    ));
}

#[test]
fn bad_labels_and_values_are_errors() {
    let flat = flatten(&[landmarks(0.3, 0.5, OPEN, false, 0.0)]);
    let out = decode_hands(&flat, &labels(&["Middle"]), &[]);
    assert!(matches!(&out[0], Err(TrackingError::UnknownHandedness(s)) if s == "Middle"));

    let mut points = landmarks(0.3, 0.5, OPEN, false, 0.0);
    points[7].y = f32::NAN;
    let err = RawHand::new(Handedness::Left, &points, 1.0).unwrap_err();
    assert_eq!(err, TrackingError::NonFiniteLandmark { index: 7 });
}

#[test]
fn no_hands_gives_empty_state() {
    let mut tracker = HandTracker::default();
    let state = tracker.update(std::iter::empty());
    assert!(state.is_empty());
    assert_eq!(state.gesture, CombinedGesture::None);
    assert_eq!(state.strength, 0.0);
    assert_eq!(state.frame, 1);
}

#[test]
fn one_open_hand_rotates() {
    let mut tracker = HandTracker::default();
    let state = tracker.update([Ok(raw(Handedness::Right, 0.5, 0.5, OPEN, false))]);
    assert_eq!(state.gesture, CombinedGesture::Rotate);
    assert_eq!(state.hand_count(), 1);
    assert_eq!(state.primary().unwrap().gesture, Gesture::OpenPalm);
}

#[test]
fn one_pinching_hand_drags_with_strength() {
    let mut tracker = HandTracker::default();
    let state = tracker.update([Ok(raw(Handedness::Left, 0.5, 0.5, OPEN, true))]);
    assert_eq!(state.gesture, CombinedGesture::PinchDrag);
    let h = state.left.as_ref().unwrap();
    assert!((state.strength - h.pinch_strength).abs() < 1e-6);
    assert!(state.strength > 0.0);
}

#[test]
fn two_spread_open_hands_zoom() {
    let mut tracker = HandTracker::default();
    let state = tracker.update([
        Ok(raw(Handedness::Left, 0.2, 0.5, OPEN, false)),
        Ok(raw(Handedness::Right, 0.8, 0.5, OPEN, false)),
    ]);
    assert_eq!(state.gesture, CombinedGesture::Zoom);
    assert!((state.strength - 0.6).abs() < 1e-4);
}

#[test]
fn two_hands_close_together_or_pinching_do_nothing() {
    let mut tracker = HandTracker::default();
    let close = tracker.update([
        Ok(raw(Handedness::Left, 0.45, 0.5, OPEN, false)),
        Ok(raw(Handedness::Right, 0.55, 0.5, OPEN, false)),
    ]);
    assert_eq!(close.gesture, CombinedGesture::None);

    let mut tracker = HandTracker::default();
    let pinching = tracker.update([
        Ok(raw(Handedness::Left, 0.2, 0.5, OPEN, true)),
        Ok(raw(Handedness::Right, 0.8, 0.5, OPEN, false)),
    ]);
    assert_eq!(pinching.gesture, CombinedGesture::None);
    assert_eq!(pinching.strength, 0.0);
}

#[test]
fn duplicate_label_keeps_more_confident_hand() {
    let mut tracker = HandTracker::default();
    let mut weak = raw(Handedness::Right, 0.2, 0.5, OPEN, false);
    weak.confidence = 0.3;
    let strong = raw(Handedness::Right, 0.7, 0.5, OPEN, false);
    let state = tracker.update([Ok(weak), Ok(strong)]);
    assert_eq!(state.hand_count(), 1);
    assert!((state.right.unwrap().palm_position.x - 0.7).abs() < 1e-5);
}

#[test]
fn malformed_hand_does_not_drop_the_frame() {
    let mut tracker = HandTracker::default();
    let state = tracker.update([
        Err(TrackingError::IncompleteHand { found: 3, expected: LANDMARK_COUNT }),
        Ok(raw(Handedness::Left, 0.5, 0.5, OPEN, false)),
    ]);
    assert!(state.left.is_some());
    assert!(state.right.is_none());
}

#[test]
fn history_is_per_side_and_cleared_when_hand_leaves() {
    let mut tracker = HandTracker::default();
    tracker.update([Ok(raw(Handedness::Right, 0.2, 0.5, OPEN, false))]);
    let smoothed = tracker.update([Ok(raw(Handedness::Right, 0.6, 0.5, OPEN, false))]);
    assert!((smoothed.right.unwrap().palm_position.x - 0.4).abs() < 1e-5);

    // gone for a frame, then back: no blending with the stale pose
    tracker.update(std::iter::empty());
    let fresh = tracker.update([Ok(raw(Handedness::Right, 0.8, 0.5, OPEN, false))]);
    assert!((fresh.right.unwrap().palm_position.x - 0.8).abs() < 1e-5);

    // the left hand never saw the right hand's history
    let left = tracker.update([Ok(raw(Handedness::Left, 0.1, 0.5, OPEN, false))]);
    assert!((left.left.unwrap().palm_position.x - 0.1).abs() < 1e-5);
}

#[test]
fn cell_returns_latest_whole_state() {
    let cell = TrackingCell::new();
    assert!(cell.latest().is_empty());

    let reader = cell.clone();
    let mut tracker = HandTracker::default();
    tracker.update_into([Ok(raw(Handedness::Right, 0.5, 0.5, OPEN, false))], &cell);
    let held = reader.latest();
    tracker.update_into([Ok(raw(Handedness::Left, 0.5, 0.5, OPEN, true))], &cell);

    // a reader's snapshot is never mutated underneath it
    assert!(held.right.is_some() && held.left.is_none());
    let now = reader.latest();
    assert!(now.left.is_some() && now.right.is_none());
    assert_eq!(now.frame, 2);

    cell.clear();
    assert!(reader.latest().is_empty());
}

#[test]
fn aggregate_prefers_zoom_only_above_threshold() {
    let l = hand(Handedness::Left, Vec3::new(0.4, 0.5, 0.0), false, 0.0, 5);
    let r = hand(Handedness::Right, Vec3::new(0.5, 0.5, 0.0), false, 0.0, 5);
    let (g, s) = aggregate(Some(&l), Some(&r), ZOOM_SPREAD_THRESHOLD);
    assert_eq!((g, s), (CombinedGesture::None, 0.0));

    let (g, _) = aggregate(None, Some(&r), ZOOM_SPREAD_THRESHOLD);
    assert_eq!(g, CombinedGesture::Rotate);
    assert_eq!(aggregate(None, None, 0.2), (CombinedGesture::None, 0.0));
}

#[test]
fn handedness_parses_case_insensitively() {
    assert_eq!(" LEFT ".parse::<Handedness>().unwrap(), Handedness::Left);
    assert_eq!("Right".parse::<Handedness>().unwrap(), Handedness::Right);
    assert!("".parse::<Handedness>().is_err());
    assert_eq!(Handedness::Left.to_string(), "Left");
}
