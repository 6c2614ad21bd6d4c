//! Gestura CLI: replay landmark recordings through the gesture pipeline.
//!
//! Usage:
//!   gestura replay <FRAMES>      Run a recorded frame stream through a session
//!   gestura classify <LANDMARKS> Classify a single landmark set
//!   gestura config               Show (or write) the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gestura_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "gestura",
    about = "Hands-free gesture pipeline over hand-landmark streams",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit structured JSON logs
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSONL frame recording through a gesture session
    Replay {
        /// Path to the frames.jsonl recording
        frames: PathBuf,

        /// Write composed events to this JSONL file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replay rate (0 = as fast as possible); defaults to the config value
        #[arg(long)]
        fps: Option<u32>,

        /// Pipeline config file (defaults to the standard location)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Classify one hand landmark set stored as JSON
    Classify {
        /// Path to a landmark set JSON file
        landmarks: PathBuf,

        /// Pipeline config file (defaults to the standard location)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        /// Save the effective configuration to the standard location
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app_config = AppConfig::load();

    let mut logging = app_config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if cli.json_logs {
        logging.json = true;
    }
    gestura_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Replay {
            frames,
            output,
            fps,
            config,
        } => commands::replay::run(&app_config, frames, output, fps, config).await,
        Commands::Classify { landmarks, config } => commands::classify::run(landmarks, config),
        Commands::Config { write } => commands::config::run(&app_config, write),
    }
}
