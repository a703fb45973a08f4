//! Trait definitions for CovDash.
//!
//! A [`RecordSource`] is the seam between the data access facade and
//! wherever the dataset actually lives (memory, JSON files, a telemetry
//! export).

use std::sync::Arc;

use crate::error::CoreError;
use crate::models::{ApiRecord, TrendPoint};

/// Trait for anything that can supply the session's API records.
///
/// Implementors must return the same records, in the same order, for the
/// whole session; the facade filters and summarizes them on every request.
pub trait RecordSource: Send + Sync {
    /// Short description used in logs.
    fn describe(&self) -> String;

    /// Loads the full record set in insertion order.
    ///
    /// An empty dataset is `Ok` with an empty slice, never an error.
    fn load_records(
        &self,
    ) -> impl std::future::Future<Output = Result<Arc<[ApiRecord]>, CoreError>> + Send;

    /// Loads the coverage trend series.
    ///
    /// Default implementation returns an empty series.
    fn load_trend(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<TrendPoint>, CoreError>> + Send {
        async { Ok(Vec::new()) }
    }
}
