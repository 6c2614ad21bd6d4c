//! Hand landmark types in canonical 21-point topology.

use serde::{Deserialize, Serialize};

use crate::point::Point2D;

/// Number of landmarks in a complete hand set.
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// (tip, pip) pairs for the four non-thumb fingers.
pub const FINGER_TIP_PIP: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Landmark used as the palm reference for pointer control.
pub const PALM_CENTER: usize = MIDDLE_MCP;

/// A single detected landmark.
///
/// `z` is relative depth as reported by the detector; the gesture pipeline
/// only uses `x` and `y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Which hand the detector believes it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

/// One detected hand: landmarks plus handedness.
///
/// A set is complete when it has at least [`HAND_LANDMARK_COUNT`] points;
/// points beyond that are ignored. Providers omitting handedness get
/// [`Handedness::Right`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarkSet {
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub handedness: Handedness,
}

/// Reasons a landmark set cannot be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    #[error("expected 21 landmarks, got {count}")]
    TooFewLandmarks { count: usize },

    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

impl HandLandmarkSet {
    pub fn new(landmarks: Vec<Landmark>, handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    /// Whether enough points are present for classification.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= HAND_LANDMARK_COUNT
    }

    /// Landmark at a canonical index, if present.
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    pub fn wrist(&self) -> Option<&Landmark> {
        self.get(WRIST)
    }

    pub fn palm(&self) -> Option<&Landmark> {
        self.get(PALM_CENTER)
    }

    /// Check the set is complete and every used coordinate is finite.
    pub fn validate(&self) -> Result<(), LandmarkError> {
        if !self.is_complete() {
            return Err(LandmarkError::TooFewLandmarks {
                count: self.landmarks.len(),
            });
        }

        if let Some(index) = self.landmarks[..HAND_LANDMARK_COUNT]
            .iter()
            .position(|lm| !lm.xy().is_finite())
        {
            return Err(LandmarkError::NonFinite { index });
        }

        Ok(())
    }
}
