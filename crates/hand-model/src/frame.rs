//! Per-frame provider output.
//!
//! Recorded landmark streams are stored as JSONL: one [`HandFrame`] per line,
//! with blank lines and `#` comment lines ignored.

use serde::{Deserialize, Serialize};

use crate::landmark::HandLandmarkSet;

/// Monotonic timestamp in nanoseconds since the source started.
pub type TimestampNs = u64;

/// What the landmark provider saw in one camera frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// Monotonic nanoseconds since the source started.
    #[serde(rename = "t", default)]
    pub timestamp_ns: TimestampNs,

    /// The first detected hand, or `None` when no hand is visible.
    #[serde(default)]
    pub hand: Option<HandLandmarkSet>,
}

impl HandFrame {
    pub fn with_hand(timestamp_ns: TimestampNs, hand: HandLandmarkSet) -> Self {
        Self {
            timestamp_ns,
            hand: Some(hand),
        }
    }

    pub fn empty(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            hand: None,
        }
    }
}

/// Whether a JSONL line carries a record.
pub fn is_record_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<HandFrame>, serde_json::Error> {
    jsonl
        .lines()
        .filter(|line| is_record_line(line))
        .map(|line| serde_json::from_str(line.trim()))
        .collect()
}
