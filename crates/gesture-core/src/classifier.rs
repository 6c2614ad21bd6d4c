//! Per-frame hand pose classification.
//!
//! Classification is a pure function of one landmark set. It uses a handful
//! of geometric cues:
//!
//! 1. **Thumb extension:** thumb tip vs. thumb IP along x, mirrored by handedness.
//! 2. **Finger extension:** a fingertip above its PIP joint (image y grows down).
//! 3. **Pinch:** thumb tip to index tip distance.
//! 4. **Spread:** mean wrist-to-fingertip distance over the four non-thumb tips.
//!
//! Poses resolve in priority order Fist, Pinch, Open Palm, then the generic
//! Hand Pose carrying the extended-finger count.

use gestura_hand_model::landmark::{
    HandLandmarkSet, Handedness, FINGER_TIP_PIP, INDEX_TIP, THUMB_IP, THUMB_TIP, WRIST,
};
use gestura_hand_model::{GestureClassification, Pose};
use serde::{Deserialize, Serialize};

/// Thresholds for pose classification, in normalized frame units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Thumb-tip to index-tip distance below which the hand is pinching.
    pub pinch_distance: f64,

    /// Mean fingertip-to-wrist distance below which the hand is a fist.
    pub fist_spread: f64,

    /// Mean fingertip-to-wrist distance above which the palm is open.
    pub open_palm_spread: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pinch_distance: 0.05,
            fist_spread: 0.23,
            open_palm_spread: 0.4,
        }
    }
}

/// Geometric measurements behind one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandMetrics {
    pub thumb_extended: bool,
    /// Thumb plus extended non-thumb fingers, `0..=5`.
    pub extended_count: u8,
    pub pinch_distance: f64,
    pub mean_tip_distance: f64,
}

/// Stateless pose classifier.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ClassifierConfig::default())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one landmark set.
    ///
    /// Sets with fewer than 21 points classify as [`Pose::None`] with zero
    /// fingers.
    pub fn classify(&self, hand: &HandLandmarkSet) -> GestureClassification {
        match self.measure(hand) {
            Some(metrics) => self.resolve(&metrics),
            None => GestureClassification::NONE,
        }
    }

    /// Compute the geometric cues, or `None` for an incomplete set.
    pub fn measure(&self, hand: &HandLandmarkSet) -> Option<HandMetrics> {
        if !hand.is_complete() {
            return None;
        }
        let lm = &hand.landmarks;

        let thumb_tip = lm[THUMB_TIP];
        let thumb_ip = lm[THUMB_IP];
        let thumb_extended = match hand.handedness {
            Handedness::Right => thumb_tip.x > thumb_ip.x,
            Handedness::Left => thumb_tip.x < thumb_ip.x,
        };

        let fingers_extended = FINGER_TIP_PIP
            .iter()
            .filter(|&&(tip, pip)| lm[tip].y < lm[pip].y)
            .count() as u8;

        let pinch_distance = thumb_tip.xy().distance_to(&lm[INDEX_TIP].xy());

        let wrist = lm[WRIST].xy();
        let mean_tip_distance = FINGER_TIP_PIP
            .iter()
            .map(|&(tip, _)| lm[tip].xy().distance_to(&wrist))
            .sum::<f64>()
            / FINGER_TIP_PIP.len() as f64;

        Some(HandMetrics {
            thumb_extended,
            extended_count: u8::from(thumb_extended) + fingers_extended,
            pinch_distance,
            mean_tip_distance,
        })
    }

    fn resolve(&self, metrics: &HandMetrics) -> GestureClassification {
        let is_fist = metrics.mean_tip_distance < self.config.fist_spread;
        let is_pinch = metrics.pinch_distance < self.config.pinch_distance;
        let is_open_palm = metrics.mean_tip_distance > self.config.open_palm_spread;

        if is_fist {
            GestureClassification::new(Pose::Fist, 0)
        } else if is_pinch {
            GestureClassification::new(Pose::Pinch, metrics.extended_count)
        } else if is_open_palm {
            GestureClassification::new(Pose::OpenPalm, 5)
        } else {
            GestureClassification::new(Pose::HandPose, metrics.extended_count)
        }
    }
}

/// Classify with the default thresholds.
pub fn classify(hand: &HandLandmarkSet) -> GestureClassification {
    GestureClassifier::with_defaults().classify(hand)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use gestura_hand_model::landmark::{
        HandLandmarkSet, Handedness, Landmark, FINGER_TIP_PIP, HAND_LANDMARK_COUNT, INDEX_TIP,
        PALM_CENTER, THUMB_IP, THUMB_TIP, WRIST,
    };

    /// Shape of a synthetic hand.
    #[derive(Debug, Clone, Copy)]
    pub struct HandShape {
        pub wrist: (f64, f64),
        /// Distance from the wrist to each non-thumb fingertip.
        pub spread: f64,
        pub fingers_extended: [bool; 4],
        pub thumb_extended: bool,
        pub pinch: bool,
        pub handedness: Handedness,
    }

    impl HandShape {
        pub fn relaxed_open() -> Self {
            Self {
                wrist: (0.5, 0.85),
                spread: 0.45,
                fingers_extended: [true; 4],
                thumb_extended: true,
                pinch: false,
                handedness: Handedness::Right,
            }
        }

        pub fn fist() -> Self {
            Self {
                spread: 0.15,
                fingers_extended: [false; 4],
                thumb_extended: false,
                ..Self::relaxed_open()
            }
        }

        pub fn at_wrist(self, x: f64, y: f64) -> Self {
            Self {
                wrist: (x, y),
                ..self
            }
        }

        pub fn build(&self) -> HandLandmarkSet {
            let (wx, wy) = self.wrist;
            let mut lm = vec![Landmark::new(wx, wy); HAND_LANDMARK_COUNT];
            lm[WRIST] = Landmark::new(wx, wy);

            const OFFSETS: [f64; 4] = [-0.06, -0.02, 0.02, 0.06];
            for (i, &(tip, pip)) in FINGER_TIP_PIP.iter().enumerate() {
                let dx = OFFSETS[i];
                let dy = (self.spread * self.spread - dx * dx).sqrt();
                lm[tip] = Landmark::new(wx + dx, wy - dy);
                lm[pip] = if self.fingers_extended[i] {
                    Landmark::new(wx + dx, wy - dy * 0.5)
                } else {
                    Landmark::new(wx + dx, wy - dy - 0.03)
                };
            }

            let index_tip = lm[INDEX_TIP];
            let thumb_tip = if self.pinch {
                Landmark::new(index_tip.x + 0.01, index_tip.y + 0.01)
            } else {
                Landmark::new(wx - 0.25, wy - 0.15)
            };
            let dir = match self.handedness {
                Handedness::Right => 1.0,
                Handedness::Left => -1.0,
            };
            let ip_dx = (if self.thumb_extended { -0.03 } else { 0.03 }) * dir;
            lm[THUMB_TIP] = thumb_tip;
            lm[THUMB_IP] = Landmark::new(thumb_tip.x + ip_dx, thumb_tip.y + 0.03);

            lm[PALM_CENTER] = Landmark::new(wx, wy - 0.15);

            HandLandmarkSet::new(lm, self.handedness)
        }
    }
}
