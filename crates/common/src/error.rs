//! Error types shared across Gestura crates.

use std::path::PathBuf;

/// Top-level error type for Gestura operations.
#[derive(Debug, thiserror::Error)]
pub enum GesturaError {
    #[error("Malformed landmarks: {message}")]
    MalformedLandmarks { message: String },

    #[error("Provider error: {message}")]
    Provider { message: String },

    #[error("Consumer error: {message}")]
    Consumer { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GesturaError.
pub type GesturaResult<T> = Result<T, GesturaError>;

impl GesturaError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedLandmarks {
            message: msg.into(),
        }
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider {
            message: msg.into(),
        }
    }

    pub fn consumer(msg: impl Into<String>) -> Self {
        Self::Consumer {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error only affects the frame it was raised for.
    pub fn is_frame_local(&self) -> bool {
        matches!(self, Self::MalformedLandmarks { .. } | Self::Consumer { .. })
    }

    /// The message without the category prefix, for user-facing status text.
    pub fn message(&self) -> String {
        match self {
            Self::MalformedLandmarks { message }
            | Self::Provider { message }
            | Self::Consumer { message }
            | Self::Config { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
