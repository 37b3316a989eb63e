//! Platform-independent core of Touchless.
//!
//! Everything in here is plain Rust so it can be exercised by host-side tests:
//! landmark decoding, the per-hand signal processor, the two-hand aggregator and
//! its shared cell, the grab state machine, and the three scene controllers that
//! turn a [`TrackingState`] into a [`SceneSnapshot`] once per rendered frame.

pub mod arena;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod grab;
pub mod hand;
pub mod landmarks;
pub mod mesh;
pub mod scenes;
pub mod snapshot;
pub mod tracking;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use arena::{Arena, EntityId};
pub use constants::*;
pub use error::TrackingError;
pub use gesture::{classify_gesture, CombinedGesture, Gesture};
pub use grab::{update_holds, Grabbable, HandMapping, HandPose, HoldEvent};
pub use hand::{HandData, HandProcessor, TrackingConfig};
pub use landmarks::{decode_hands, Handedness, RawHand};
pub use mesh::{MeshData, MeshKind, Vertex};
pub use scenes::{
    AnatomyScene, ChemistryLab, SceneController, SceneKind, SolarSystem,
};
pub use snapshot::{Camera, InstanceRaw, SceneSnapshot};
pub use tracking::{aggregate, HandTracker, TrackingCell, TrackingState};
