//! Palm pointer stabilization.
//!
//! Raw palm coordinates are remapped so that a reduced central region of the
//! camera frame covers the whole UI surface, then passed through a one-pole
//! low-pass filter. Output is clamped slightly inside the surface so the
//! pointer never sits on an edge.

use gestura_hand_model::Point2D;
use serde::{Deserialize, Serialize};

/// Pointer smoothing tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Fraction stripped from each edge of the frame, per axis.
    pub margin: f64,

    /// Blend factor toward the new sample, in `(0, 1)`.
    pub smoothing: f64,

    /// Lower bound of the output on both axes.
    pub min_output: f64,

    /// Upper bound of the output on both axes.
    pub max_output: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            margin: 0.12,
            smoothing: 0.18,
            min_output: 0.02,
            max_output: 0.98,
        }
    }
}

/// One-pole pointer filter. One instance per session.
#[derive(Debug, Clone)]
pub struct PointerSmoother {
    config: PointerConfig,
    smoothed: Point2D,
}

impl PointerSmoother {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            smoothed: Point2D::new(0.5, 0.5),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(PointerConfig::default())
    }

    /// Feed one raw palm sample and return the updated pointer.
    ///
    /// Callers only feed frames where the pointer is active; skipping a frame
    /// leaves the last value in place.
    pub fn update(&mut self, raw: Point2D) -> Point2D {
        let target = self.remap(raw);
        let k = self.config.smoothing;
        let (lo, hi) = (self.config.min_output, self.config.max_output);

        let x = self.smoothed.x + (target.x - self.smoothed.x) * k;
        let y = self.smoothed.y + (target.y - self.smoothed.y) * k;
        self.smoothed = Point2D::new(x.clamp(lo, hi), y.clamp(lo, hi));
        self.smoothed
    }

    /// Strip the margins and clamp into `[0, 1]`.
    pub fn remap(&self, raw: Point2D) -> Point2D {
        let m = self.config.margin;
        let span = 1.0 - m * 2.0;
        Point2D::new(
            ((raw.x - m) / span).clamp(0.0, 1.0),
            ((raw.y - m) / span).clamp(0.0, 1.0),
        )
    }

    /// Last smoothed position.
    pub fn position(&self) -> Point2D {
        self.smoothed
    }

    /// Return to the initial centered position.
    pub fn reset(&mut self) {
        self.smoothed = Point2D::new(0.5, 0.5);
    }
}

impl Default for PointerSmoother {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_centered() {
        let smoother = PointerSmoother::with_defaults();
        assert_eq!(smoother.position(), Point2D::new(0.5, 0.5));
    }

    #[test]
    fn test_remap_strips_margins() {
        let smoother = PointerSmoother::with_defaults();
        let p = smoother.remap(Point2D::new(0.12, 0.88));
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);

        let centered = smoother.remap(Point2D::new(0.5, 0.5));
        assert!((centered.x - 0.5).abs() < 1e-12);

        let outside = smoother.remap(Point2D::new(-0.3, 1.4));
        assert_eq!(outside, Point2D::new(0.0, 1.0));
    }

    #[test]
    fn test_single_step() {
        let mut smoother = PointerSmoother::with_defaults();
        // raw 0.88 maps to 1.0; one step moves 18% of the way.
        let p = smoother.update(Point2D::new(0.88, 0.12));
        assert!((p.x - 0.59).abs() < 1e-12);
        assert!((p.y - 0.41).abs() < 1e-12);
    }

    #[test]
    fn test_converges_monotonically_without_overshoot() {
        let mut smoother = PointerSmoother::with_defaults();
        // Raw palm position whose remapped target is (0.9, 0.9).
        let raw = Point2D::new(0.804, 0.804);
        let target = smoother.remap(raw);
        assert!((target.x - 0.9).abs() < 1e-9);

        let mut prev = smoother.position();
        for _ in 0..200 {
            let p = smoother.update(raw);
            assert!(p.x >= prev.x && p.y >= prev.y);
            assert!(p.x <= target.x + 1e-12 && p.y <= target.y + 1e-12);
            prev = p;
        }
        assert!((prev.x - target.x).abs() < 1e-3);
        assert!((prev.y - target.y).abs() < 1e-3);
    }

    #[test]
    fn test_extreme_targets_stay_bounded() {
        let mut smoother = PointerSmoother::with_defaults();
        for _ in 0..200 {
            let p = smoother.update(Point2D::new(5.0, -5.0));
            assert!((0.02..=0.98).contains(&p.x));
            assert!((0.02..=0.98).contains(&p.y));
        }
        assert_eq!(smoother.position(), Point2D::new(0.98, 0.02));
    }

    #[test]
    fn test_reset() {
        let mut smoother = PointerSmoother::with_defaults();
        smoother.update(Point2D::new(0.1, 0.1));
        smoother.reset();
        assert_eq!(smoother.position(), Point2D::new(0.5, 0.5));
    }

    proptest! {
        #[test]
        fn prop_output_always_bounded(
            samples in prop::collection::vec((-2.0f64..3.0, -2.0f64..3.0), 1..64)
        ) {
            let mut smoother = PointerSmoother::with_defaults();
            for (x, y) in samples {
                let p = smoother.update(Point2D::new(x, y));
                prop_assert!((0.02..=0.98).contains(&p.x));
                prop_assert!((0.02..=0.98).contains(&p.y));
            }
        }

        #[test]
        fn prop_moves_toward_target(x in 0.0f64..1.0, y in 0.0f64..1.0) {
            let mut smoother = PointerSmoother::with_defaults();
            let raw = Point2D::new(x, y);
            let target = smoother.remap(raw);
            let before = smoother.position();
            let after = smoother.update(raw);
            prop_assert!((after.x - target.x).abs() <= (before.x - target.x).abs() + 1e-12);
            prop_assert!((after.y - target.y).abs() <= (before.y - target.y).abs() + 1e-12);
        }
    }
}
