//! Fist-hold selection.
//!
//! Holding a fist for a fixed duration selects whatever the pointer is over.
//! The tracker reports hold progress on every fist frame and marks exactly
//! one frame as `selected` per completed hold; the next fist frame starts a
//! fresh hold.

use gestura_common::clock::FrameClock;
use gestura_hand_model::{HoldProgress, Pose, TimestampNs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Seconds a fist must be held to select.
    pub hold_secs: f64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self { hold_secs: 1.0 }
    }
}

/// Fist-hold timer. One instance per session.
#[derive(Debug, Clone, Default)]
pub struct HoldTracker {
    config: HoldConfig,
    started_ns: Option<TimestampNs>,
}

impl HoldTracker {
    pub fn new(config: HoldConfig) -> Self {
        Self {
            config,
            started_ns: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(HoldConfig::default())
    }

    /// Feed one frame's pose (`None` when no hand was seen).
    pub fn update(&mut self, pose: Option<Pose>, timestamp_ns: TimestampNs) -> Option<HoldProgress> {
        if pose != Some(Pose::Fist) {
            self.started_ns = None;
            return None;
        }

        let started = *self.started_ns.get_or_insert(timestamp_ns);
        let held_secs = FrameClock::ns_to_secs(timestamp_ns.saturating_sub(started));
        let selected = held_secs >= self.config.hold_secs;
        if selected {
            tracing::debug!(held_secs, "Fist hold completed");
            self.started_ns = None;
        }

        Some(HoldProgress {
            held_secs,
            selected,
        })
    }

    pub fn is_holding(&self) -> bool {
        self.started_ns.is_some()
    }

    pub fn reset(&mut self) {
        self.started_ns = None;
    }
}
