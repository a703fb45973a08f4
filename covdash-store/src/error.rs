//! Store error types.

use std::path::PathBuf;

use covdash_core::CoreError;
use thiserror::Error;

/// Errors that can occur while loading or saving datasets and config.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Dataset file not found.
    #[error("Dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A usage row carries a count that is not a non-negative integer.
    #[error("Invalid {field} for {api}: {value:?}")]
    InvalidCount {
        /// API the row belongs to.
        api: String,
        /// Which field failed to parse.
        field: &'static str,
        /// Raw value.
        value: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(e) => CoreError::Serialization(e),
            StoreError::Config(msg) => CoreError::InvalidConfig(msg),
            StoreError::InvalidCount { .. } => CoreError::InvalidData(err.to_string()),
            StoreError::NotFound(_) | StoreError::Io(_) => CoreError::Source(err.to_string()),
        }
    }
}
