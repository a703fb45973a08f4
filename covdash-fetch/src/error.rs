//! Fetch error types.

use covdash_core::CoreError;
use covdash_store::StoreError;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for facade operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The record source failed. Not retried.
    #[error("Data source failed: {0}")]
    Source(String),

    /// The dataset was readable but invalid.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Core error.
    #[error("Core error: {0}")]
    Core(CoreError),
}

impl FetchError {
    /// Returns true if the failure came from the record source.
    pub fn is_source(&self) -> bool {
        matches!(self, FetchError::Source(_))
    }
}

impl From<CoreError> for FetchError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Source(msg) => FetchError::Source(msg),
            CoreError::InvalidData(msg) => FetchError::InvalidData(msg),
            other => FetchError::Core(other),
        }
    }
}

impl From<StoreError> for FetchError {
    fn from(err: StoreError) -> Self {
        CoreError::from(err).into()
    }
}
