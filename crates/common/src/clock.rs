//! Frame clock and pacing utilities.
//!
//! Frames carry monotonic timestamps in nanoseconds relative to the moment a
//! session's source started. This module provides:
//! - The session epoch and elapsed-time queries
//! - Nanosecond to second conversion
//! - A pacer that spaces out frame delivery at a target rate

use std::time::{Duration, Instant};

/// Monotonic clock anchored at the start of a frame source.
#[derive(Debug, Clone)]
pub struct FrameClock {
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339).
    epoch_wall: String,
}

impl FrameClock {
    /// Create a clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Nanoseconds elapsed since the epoch.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at the epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }
}

/// Spaces frame delivery at a fixed rate.
///
/// A pacer built with `fps == 0` never waits.
#[derive(Debug)]
pub struct FramePacer {
    interval: Option<Duration>,
    next_due: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: (fps > 0).then(|| Duration::from_nanos(1_000_000_000 / fps as u64)),
            next_due: None,
        }
    }

    /// Time to wait before the next frame may be delivered, measured at `now`.
    ///
    /// The first call never waits. Each call schedules the following slot, and
    /// a caller that fell behind is re-anchored instead of bursting to catch up.
    pub fn delay_until_next(&mut self, now: Instant) -> Duration {
        let Some(interval) = self.interval else {
            return Duration::ZERO;
        };

        match self.next_due {
            Some(due) if due > now => {
                self.next_due = Some(due + interval);
                due - now
            }
            _ => {
                self.next_due = Some(now + interval);
                Duration::ZERO
            }
        }
    }

    /// Target interval between frames, if pacing is enabled.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}
