//! Two-hand aggregation and the shared latest-value cell.
//!
//! The detection loop is the only writer: every detection frame it builds a
//! complete [`TrackingState`] and swaps it into the [`TrackingCell`]. Scene
//! controllers read the cell once per rendered frame and always see a whole
//! state, never a mix of two frames.

use crate::error::TrackingError;
use crate::gesture::CombinedGesture;
use crate::hand::{HandData, HandProcessor, TrackingConfig};
use crate::landmarks::{Handedness, RawHand};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct TrackingState {
    pub left: Option<HandData>,
    pub right: Option<HandData>,
    pub gesture: CombinedGesture,
    pub strength: f32,
    pub frame: u64,
}

impl TrackingState {
    pub fn hand(&self, side: Handedness) -> Option<&HandData> {
        match side {
            Handedness::Left => self.left.as_ref(),
            Handedness::Right => self.right.as_ref(),
        }
    }

    pub fn hands(&self) -> impl Iterator<Item = &HandData> {
        self.left.iter().chain(self.right.iter())
    }

    pub fn hand_count(&self) -> usize {
        self.hands().count()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The right hand if present, else the left.
    pub fn primary(&self) -> Option<&HandData> {
        self.right.as_ref().or(self.left.as_ref())
    }
}

/// Combine the two optional hands into one gesture label and strength.
pub fn aggregate(
    left: Option<&HandData>,
    right: Option<&HandData>,
    spread_threshold: f32,
) -> (CombinedGesture, f32) {
    match (left, right) {
        (Some(l), Some(r)) => {
            let spread = l.palm_position.distance(r.palm_position);
            if spread > spread_threshold && !l.is_pinching && !r.is_pinching {
                (CombinedGesture::Zoom, spread)
            } else {
                (CombinedGesture::None, 0.0)
            }
        }
        (Some(h), None) | (None, Some(h)) => {
            if h.is_pinching {
                (CombinedGesture::PinchDrag, h.pinch_strength)
            } else {
                (CombinedGesture::Rotate, 0.0)
            }
        }
        (None, None) => (CombinedGesture::None, 0.0),
    }
}

/// Single-slot shared cell with latest-value-wins semantics.
///
/// Cloning the cell clones the handle, not the state.
#[derive(Clone, Default)]
pub struct TrackingCell {
    slot: Rc<RefCell<Rc<TrackingState>>>,
}

impl TrackingCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole state.
    pub fn publish(&self, state: TrackingState) {
        *self.slot.borrow_mut() = Rc::new(state);
    }

    /// The most recently published state.
    pub fn latest(&self) -> Rc<TrackingState> {
        self.slot.borrow().clone()
    }

    pub fn clear(&self) {
        self.publish(TrackingState::default());
    }
}

/// Owns the per-side smoothing history and produces one state per detection.
pub struct HandTracker {
    processor: HandProcessor,
    previous: [Option<HandData>; 2],
    frame: u64,
}

impl HandTracker {
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            processor: HandProcessor::new(config),
            previous: [None, None],
            frame: 0,
        }
    }

    /// Process one detection frame.
    ///
    /// Rejected hands are logged and skipped. If the model reports the same
    /// label twice, the more confident hand is kept.
    pub fn update<I>(&mut self, hands: I) -> TrackingState
    where
        I: IntoIterator<Item = Result<RawHand, TrackingError>>,
    {
        let mut chosen: [Option<RawHand>; 2] = [None, None];
        for hand in hands {
            match hand {
                Ok(raw) => {
                    let slot = &mut chosen[raw.handedness.index()];
                    let replace = slot
                        .as_ref()
                        .map_or(true, |kept| raw.confidence > kept.confidence);
                    if replace {
                        *slot = Some(raw);
                    }
                }
                Err(e) => log::debug!("[tracking] skipping hand: {e}"),
            }
        }

        for side in Handedness::BOTH {
            let i = side.index();
            let next = chosen[i]
                .as_ref()
                .map(|raw| self.processor.process(raw, self.previous[i].as_ref()));
            self.previous[i] = next;
        }

        let [left, right] = self.previous.clone();
        let (gesture, strength) = aggregate(
            left.as_ref(),
            right.as_ref(),
            self.processor.config().zoom_spread_threshold,
        );
        self.frame += 1;
        TrackingState {
            left,
            right,
            gesture,
            strength,
            frame: self.frame,
        }
    }

    /// Process a frame and publish it into `cell`.
    pub fn update_into<I>(&mut self, hands: I, cell: &TrackingCell)
    where
        I: IntoIterator<Item = Result<RawHand, TrackingError>>,
    {
        let state = self.update(hands);
        cell.publish(state);
    }

    pub fn reset(&mut self) {
        self.previous = [None, None];
    }
}

impl Default for HandTracker {
    fn default() -> Self {
        Self::new(TrackingConfig::default())
    }
}
