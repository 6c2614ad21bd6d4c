//! Gestura Hand Model
//!
//! Defines the data contracts between a hand-landmark provider, the gesture
//! pipeline, and the UI consumer:
//! - **Landmarks:** 21-point hand sets in canonical topology, with handedness
//! - **Frames:** Timestamped per-frame provider output (a hand or none)
//! - **Events:** The composed per-frame result delivered to the consumer
//!
//! All coordinates are normalized to the camera frame. They are nominally in
//! `[0.0, 1.0]`, but detector noise can push landmarks slightly outside.

pub mod event;
pub mod frame;
pub mod landmark;
pub mod point;

pub use event::*;
pub use frame::*;
pub use landmark::*;
pub use point::*;
