//! Classify a single landmark set.

use std::path::PathBuf;

use gestura_gesture_core::{GestureClassifier, PipelineConfig};
use gestura_hand_model::HandLandmarkSet;

pub fn run(path: PathBuf, config: Option<PathBuf>) -> anyhow::Result<()> {
    let pipeline = match config {
        Some(path) => PipelineConfig::load_from(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load pipeline config: {e}"))?,
        None => PipelineConfig::load(),
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let hand: HandLandmarkSet = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid landmark set: {e}"))?;
    hand.validate()
        .map_err(|e| anyhow::anyhow!("Invalid landmark set: {e}"))?;

    let classifier = GestureClassifier::new(pipeline.classifier);
    let output = serde_json::json!({
        "classification": classifier.classify(&hand),
        "metrics": classifier.measure(&hand),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
