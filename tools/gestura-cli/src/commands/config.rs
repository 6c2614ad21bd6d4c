//! Show or persist the effective configuration.

use gestura_common::config::{config_file_path, AppConfig};
use gestura_gesture_core::PipelineConfig;

pub fn run(app_config: &AppConfig, write: bool) -> anyhow::Result<()> {
    let pipeline = PipelineConfig::load();

    println!("# {}", config_file_path().display());
    println!("{}", serde_json::to_string_pretty(app_config)?);
    println!();
    println!("# {}", PipelineConfig::default_path().display());
    println!("{}", serde_json::to_string_pretty(&pipeline)?);

    if write {
        app_config.save()?;
        pipeline
            .save_to(PipelineConfig::default_path())
            .map_err(|e| anyhow::anyhow!("Failed to save pipeline config: {e}"))?;
        println!();
        println!("Configuration written.");
    }

    Ok(())
}
