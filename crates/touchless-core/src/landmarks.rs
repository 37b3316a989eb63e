//! Raw hand landmarks as delivered by the hand-landmark model.
//!
//! The model runs outside Rust and hands its result over as one flat `f32`
//! buffer (`hands × 21 × xyz`) plus a label and a score per hand. Decoding is
//! per hand: a malformed hand yields an error for that hand only.

use crate::constants::LANDMARK_COUNT;
use crate::error::TrackingError;
use glam::Vec3;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

const FLOATS_PER_HAND: usize = LANDMARK_COUNT * 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub const BOTH: [Handedness; 2] = [Handedness::Left, Handedness::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Handedness::Left => 0,
            Handedness::Right => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handedness {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            l if l.eq_ignore_ascii_case("left") => Ok(Handedness::Left),
            r if r.eq_ignore_ascii_case("right") => Ok(Handedness::Right),
            other => Err(TrackingError::UnknownHandedness(other.to_string())),
        }
    }
}

/// One detected hand for one video frame, validated and immutable.
#[derive(Clone, Debug)]
pub struct RawHand {
    pub handedness: Handedness,
    pub landmarks: [Vec3; LANDMARK_COUNT],
    pub confidence: f32,
}

impl RawHand {
    pub fn new(
        handedness: Handedness,
        points: &[Vec3],
        confidence: f32,
    ) -> Result<Self, TrackingError> {
        if points.len() < LANDMARK_COUNT {
            return Err(TrackingError::IncompleteHand {
                found: points.len(),
                expected: LANDMARK_COUNT,
            });
        }
        let mut landmarks = [Vec3::ZERO; LANDMARK_COUNT];
        for (index, (dst, src)) in landmarks.iter_mut().zip(points).enumerate() {
            if !src.is_finite() {
                return Err(TrackingError::NonFiniteLandmark { index });
            }
            *dst = *src;
        }
        Ok(Self {
            handedness,
            landmarks,
            confidence,
        })
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec3 {
        self.landmarks[index]
    }
}

/// Decode the flat bridge payload into one result per reported hand.
///
/// A hand whose slice of `flat` is short produces `IncompleteHand`; landmark
/// data beyond the labelled hands produces a trailing `PayloadMismatch`.
/// Missing scores default to 1.0.
pub fn decode_hands(
    flat: &[f32],
    labels: &[String],
    scores: &[f32],
) -> SmallVec<[Result<RawHand, TrackingError>; 2]> {
    let mut out = SmallVec::new();
    for (i, label) in labels.iter().enumerate() {
        let start = i * FLOATS_PER_HAND;
        let end = (start + FLOATS_PER_HAND).min(flat.len());
        let chunk = if start < flat.len() { &flat[start..end] } else { &[][..] };
        let points: SmallVec<[Vec3; LANDMARK_COUNT]> = chunk
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        let confidence = scores.get(i).copied().unwrap_or(1.0);
        let decoded = label
            .parse::<Handedness>()
            .and_then(|h| RawHand::new(h, &points, confidence));
        out.push(decoded);
    }
    let complete_hands = flat.len() / FLOATS_PER_HAND;
    if complete_hands > labels.len() {
        out.push(Err(TrackingError::PayloadMismatch {
            hands: complete_hands,
            labels: labels.len(),
        }));
    }
    out
}
