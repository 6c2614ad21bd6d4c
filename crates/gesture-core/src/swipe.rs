//! Horizontal swipe detection from the wrist position stream.
//!
//! A swipe is a single-frame jump in wrist x larger than a threshold. Each
//! detected swipe arms a cooldown measured in delivered frames, during which
//! further jumps are ignored. The first observed position only establishes a
//! baseline, so a detector never fires on its first frame.

use gestura_hand_model::SwipeEvent;
use serde::{Deserialize, Serialize};

/// Swipe detector tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Minimum per-frame wrist x displacement (normalized) for a swipe.
    pub min_delta: f64,

    /// Frames to ignore after a swipe fires.
    pub cooldown_frames: u32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_delta: 0.06,
            cooldown_frames: 10,
        }
    }
}

/// Edge-triggered swipe detector. One instance per session.
#[derive(Debug, Clone, Default)]
pub struct SwipeDetector {
    config: SwipeConfig,
    last_wrist_x: Option<f64>,
    cooldown_remaining: u32,
}

impl SwipeDetector {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            last_wrist_x: None,
            cooldown_remaining: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SwipeConfig::default())
    }

    /// Feed one frame's wrist x (`None` when no hand was seen).
    ///
    /// A missing hand leaves the baseline and cooldown untouched.
    pub fn update(&mut self, wrist_x: Option<f64>) -> Option<SwipeEvent> {
        let x = wrist_x?;

        let Some(last) = self.last_wrist_x.replace(x) else {
            return None;
        };
        let delta = x - last;

        if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
            return None;
        }

        let swipe = if delta > self.config.min_delta {
            SwipeEvent::Right
        } else if delta < -self.config.min_delta {
            SwipeEvent::Left
        } else {
            return None;
        };

        self.cooldown_remaining = self.config.cooldown_frames;
        tracing::debug!(?swipe, delta, "Swipe detected");
        Some(swipe)
    }

    /// Forget the baseline and any pending cooldown.
    pub fn reset(&mut self) {
        self.last_wrist_x = None;
        self.cooldown_remaining = 0;
    }

    pub fn last_wrist_x(&self) -> Option<f64> {
        self.last_wrist_x
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut SwipeDetector, xs: &[f64]) -> Vec<Option<SwipeEvent>> {
        xs.iter().map(|&x| detector.update(Some(x))).collect()
    }

    #[test]
    fn test_swipe_right_then_cooldown() {
        let mut detector = SwipeDetector::with_defaults();
        let events = feed(&mut detector, &[0.5, 0.5, 0.58]);
        assert_eq!(events, vec![None, None, Some(SwipeEvent::Right)]);
        assert_eq!(detector.cooldown_remaining(), 10);

        // Frames 4..=13: large jumps in both directions are suppressed.
        let mut x = 0.58;
        for frame in 4..=13 {
            x += if frame % 2 == 0 { 0.2 } else { -0.2 };
            assert_eq!(detector.update(Some(x)), None, "frame {frame}");
        }
        assert_eq!(detector.cooldown_remaining(), 0);

        // Frame 14 may swipe again.
        assert_eq!(detector.update(Some(x - 0.1)), Some(SwipeEvent::Left));
    }

    #[test]
    fn test_never_fires_on_first_frame() {
        let mut detector = SwipeDetector::with_defaults();
        assert_eq!(detector.update(Some(0.95)), None);
        assert_eq!(detector.last_wrist_x(), Some(0.95));
    }

    #[test]
    fn test_absent_hand_keeps_state() {
        let mut detector = SwipeDetector::with_defaults();
        detector.update(Some(0.3));
        assert_eq!(detector.update(None), None);
        assert_eq!(detector.last_wrist_x(), Some(0.3));

        // The jump is measured against the last seen position.
        assert_eq!(detector.update(Some(0.4)), Some(SwipeEvent::Right));
    }

    #[test]
    fn test_absent_hand_does_not_consume_cooldown() {
        let mut detector = SwipeDetector::with_defaults();
        feed(&mut detector, &[0.5, 0.4]);
        assert_eq!(detector.cooldown_remaining(), 10);
        for _ in 0..20 {
            detector.update(None);
        }
        assert_eq!(detector.cooldown_remaining(), 10);
    }

    #[test]
    fn test_small_motion_is_ignored() {
        let mut detector = SwipeDetector::with_defaults();
        let events = feed(&mut detector, &[0.5, 0.55, 0.6, 0.65, 0.6, 0.55]);
        assert!(events.iter().all(Option::is_none));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut detector = SwipeDetector::new(SwipeConfig {
            min_delta: 0.25,
            cooldown_frames: 10,
        });
        // 0.25 is exact in binary, so the delta equals the threshold.
        assert_eq!(feed(&mut detector, &[0.5, 0.75]), vec![None, None]);
        assert_eq!(detector.update(Some(0.25)), Some(SwipeEvent::Left));
    }

    #[test]
    fn test_baseline_updates_during_cooldown() {
        let mut detector = SwipeDetector::with_defaults();
        feed(&mut detector, &[0.2, 0.3]);
        for _ in 0..10 {
            detector.update(Some(0.8));
        }
        assert_eq!(detector.last_wrist_x(), Some(0.8));
        // No jump relative to the updated baseline.
        assert_eq!(detector.update(Some(0.8)), None);
    }

    #[test]
    fn test_reset() {
        let mut detector = SwipeDetector::with_defaults();
        feed(&mut detector, &[0.2, 0.3]);
        detector.reset();
        assert_eq!(detector.last_wrist_x(), None);
        assert_eq!(detector.cooldown_remaining(), 0);
        assert_eq!(detector.update(Some(0.9)), None);
    }

    #[test]
    fn test_zero_cooldown_allows_consecutive_swipes() {
        let mut detector = SwipeDetector::new(SwipeConfig {
            cooldown_frames: 0,
            ..SwipeConfig::default()
        });
        let events = feed(&mut detector, &[0.1, 0.2, 0.3]);
        assert_eq!(
            events,
            vec![None, Some(SwipeEvent::Right), Some(SwipeEvent::Right)]
        );
    }
}
