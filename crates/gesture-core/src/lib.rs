//! Gestura Gesture Core
//!
//! Turns per-frame hand landmarks into interaction signals:
//! - **Classification:** Fist, pinch, open palm or generic pose, plus a finger count
//! - **Swipe Detection:** Edge-triggered horizontal swipes with a frame cooldown
//! - **Pointer Smoothing:** Margin-remapped, low-pass filtered palm pointer
//! - **Hold Tracking:** Fist-hold selection with progress reporting
//! - **Frame Sessions:** Per-surface composition of the above into one event
//!
//! Apart from config files, this crate does no I/O and spawns no threads.
//! Temporal state lives in explicit per-session objects, never in globals.

pub mod classifier;
pub mod config;
pub mod hold;
pub mod pointer;
pub mod session;
pub mod swipe;

pub use classifier::{classify, ClassifierConfig, GestureClassifier};
pub use config::PipelineConfig;
pub use hold::{HoldConfig, HoldTracker};
pub use pointer::{PointerConfig, PointerSmoother};
pub use session::{FrameConsumer, FrameSession, SessionStats, StatusSink};
pub use swipe::{SwipeConfig, SwipeDetector};
