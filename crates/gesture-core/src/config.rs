//! Pipeline configuration.
//!
//! Every threshold has a fixed default; a `pipeline.json` only needs the
//! fields it overrides.

use std::path::{Path, PathBuf};

use gestura_common::config::config_dir;
use gestura_common::error::{GesturaError, GesturaResult};
use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;
use crate::hold::HoldConfig;
use crate::pointer::PointerConfig;
use crate::swipe::SwipeConfig;

/// Tuning for every stage of a frame session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub classifier: ClassifierConfig,
    pub swipe: SwipeConfig,
    pub pointer: PointerConfig,
    pub hold: HoldConfig,

    /// Mirror the palm x before pointer smoothing, matching a mirrored
    /// camera preview.
    pub mirror_pointer: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            swipe: SwipeConfig::default(),
            pointer: PointerConfig::default(),
            hold: HoldConfig::default(),
            mirror_pointer: true,
        }
    }
}

impl PipelineConfig {
    /// Standard location of the pipeline config file.
    pub fn default_path() -> PathBuf {
        config_dir().join("pipeline.json")
    }

    /// Load from an explicit file. Missing files are an error.
    pub fn load_from(path: impl AsRef<Path>) -> GesturaResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GesturaError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load pipeline config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Reject values that would break the pipeline's output guarantees.
    pub fn validate(&self) -> GesturaResult<()> {
        let p = &self.pointer;
        if !(p.smoothing > 0.0 && p.smoothing < 1.0) {
            return Err(GesturaError::config(format!(
                "pointer.smoothing must be in (0, 1), got {}",
                p.smoothing
            )));
        }
        if !(0.0..0.5).contains(&p.margin) {
            return Err(GesturaError::config(format!(
                "pointer.margin must be in [0, 0.5), got {}",
                p.margin
            )));
        }
        if !(0.0 <= p.min_output && p.min_output <= p.max_output && p.max_output <= 1.0) {
            return Err(GesturaError::config(format!(
                "pointer output bounds [{}, {}] must be ordered within [0, 1]",
                p.min_output, p.max_output
            )));
        }

        let c = &self.classifier;
        if c.fist_spread > c.open_palm_spread {
            return Err(GesturaError::config(format!(
                "classifier.fist_spread ({}) exceeds open_palm_spread ({})",
                c.fist_spread, c.open_palm_spread
            )));
        }
        if c.pinch_distance < 0.0 || self.swipe.min_delta < 0.0 || self.hold.hold_secs < 0.0 {
            return Err(GesturaError::config("thresholds must be non-negative"));
        }

        Ok(())
    }

    /// Write to `path` as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> GesturaResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
