//! Structured error types for the classification pipeline
//!
//! Every failure a caller can observe is one of these variants. Configuration
//! problems (unknown classifier, empty group set) are reported before any task
//! is spawned; channel misuse and transform failures abort the run.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MapSatError>;

/// Main error type for pipeline, classifier and fixture operations
#[derive(Debug, Error)]
pub enum MapSatError {
    // Validation errors, raised before any work is launched
    #[error("Unknown classifier '{name}' (available: {})", .available.join(", "))]
    UnknownClassifier { name: String, available: Vec<String> },

    #[error("Cannot compute a mean over an empty group set")]
    EmptyGroups,

    // Pipeline errors
    #[error("Transform failed in {stage}: {reason}")]
    TransformFailed { stage: String, reason: String },

    #[error("Group {group} failed: {source}")]
    GroupFailed {
        group: usize,
        #[source]
        source: Box<MapSatError>,
    },

    #[error("Channel for {stage} closed before all values were sent")]
    ChannelClosed { stage: String },

    #[error("{stage} was started outside a tokio runtime")]
    NoRuntime { stage: String },

    #[error("Channel protocol violated in {stage}: expected {expected} values, received {received}")]
    ChannelProtocol {
        stage: String,
        expected: usize,
        received: usize,
    },

    // Ambient layers
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load fixtures from {path}: {reason}")]
    FixtureLoad { path: PathBuf, reason: String },
}

impl MapSatError {
    /// Build a `TransformFailed` from a join error of a spawned task
    pub fn from_join(stage: impl Into<String>, err: tokio::task::JoinError) -> Self {
        let reason = if err.is_panic() {
            let payload = err.into_panic();
            if let Some(msg) = payload.downcast_ref::<&str>() {
                format!("task panicked: {msg}")
            } else if let Some(msg) = payload.downcast_ref::<String>() {
                format!("task panicked: {msg}")
            } else {
                "task panicked".to_string()
            }
        } else {
            format!("task aborted: {err}")
        };
        Self::TransformFailed {
            stage: stage.into(),
            reason,
        }
    }

    /// Whether the error was detected before any concurrent work started
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::UnknownClassifier { .. } | Self::EmptyGroups)
    }
}
