use thiserror::Error;

/// Per-hand problems found while turning model output into hand state.
///
/// None of these are fatal: the offending hand is skipped for the frame and the
/// other hand (if any) still flows through the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    #[error("hand has {found} landmarks, expected {expected}")]
    IncompleteHand { found: usize, expected: usize },
    #[error("landmark {index} is not finite")]
    NonFiniteLandmark { index: usize },
    #[error("unknown handedness label {0:?}")]
    UnknownHandedness(String),
    #[error("{hands} hands reported but only {labels} labels")]
    PayloadMismatch { hands: usize, labels: usize },
}
