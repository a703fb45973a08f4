//! Core error types for CovDash.

use thiserror::Error;

/// Core error type for CovDash operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record source could not produce its data.
    #[error("Data source failed: {0}")]
    Source(String),

    /// Filter criteria could not be parsed.
    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid input data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
