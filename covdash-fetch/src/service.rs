//! The asynchronous data access facade.
//!
//! [`DataService`] is what presentation code talks to. Each operation waits
//! out a configurable latency, loads the session's records from its
//! [`RecordSource`], and runs the pure engine over them. Operations share no
//! mutable state, so any number may be in flight at once.

use std::sync::Arc;
use std::time::{Duration, Instant};

use covdash_core::{
    filter_with, summarize, ApiRecord, FilterCriteria, RecordSource, SummaryStats, TrendPoint,
    UsageThresholds,
};
use covdash_store::ServiceConfig;
use tracing::{debug, instrument};

use crate::error::FetchError;

// ============================================================================
// Latency
// ============================================================================

/// Simulated latency per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceLatency {
    /// Latency of [`DataService::fetch_api_data`].
    pub data: Duration,
    /// Latency of [`DataService::fetch_summary_stats`].
    pub summary: Duration,
    /// Latency of [`DataService::fetch_trend_data`].
    pub trend: Duration,
}

impl ServiceLatency {
    /// No simulated latency.
    pub fn none() -> Self {
        Self {
            data: Duration::ZERO,
            summary: Duration::ZERO,
            trend: Duration::ZERO,
        }
    }
}

impl Default for ServiceLatency {
    fn default() -> Self {
        Self::from(&ServiceConfig::default())
    }
}

impl From<&ServiceConfig> for ServiceLatency {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            data: Duration::from_millis(config.data_latency_ms),
            summary: Duration::from_millis(config.summary_latency_ms),
            trend: Duration::from_millis(config.trend_latency_ms),
        }
    }
}

async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

// ============================================================================
// Data Service
// ============================================================================

/// Asynchronous facade over a record source.
///
/// Cloning is cheap; clones share the source.
#[derive(Debug)]
pub struct DataService<S> {
    source: Arc<S>,
    latency: ServiceLatency,
    usage_thresholds: UsageThresholds,
}

impl<S> Clone for DataService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            latency: self.latency,
            usage_thresholds: self.usage_thresholds,
        }
    }
}

impl<S: RecordSource> DataService<S> {
    /// Creates a service with default latency and thresholds.
    pub fn new(source: S) -> Self {
        Self::builder(source).build()
    }

    /// Creates a builder for customizing the service.
    pub fn builder(source: S) -> DataServiceBuilder<S> {
        DataServiceBuilder::new(source)
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The configured latency.
    pub fn latency(&self) -> ServiceLatency {
        self.latency
    }

    /// The usage thresholds applied by `high`/`medium`/`low` filters.
    pub fn usage_thresholds(&self) -> UsageThresholds {
        self.usage_thresholds
    }

    /// Returns the records matching `criteria`, or all records when `None`.
    ///
    /// The result keeps the source's order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Source`] if the source fails.
    #[instrument(skip_all, fields(source = %self.source.describe()))]
    pub async fn fetch_api_data(
        &self,
        criteria: Option<FilterCriteria>,
    ) -> Result<Vec<ApiRecord>, FetchError> {
        let start = Instant::now();
        simulate(self.latency.data).await;

        let records = self.source.load_records().await?;
        let matched = match &criteria {
            Some(criteria) => filter_with(&records, criteria, self.usage_thresholds),
            None => records.to_vec(),
        };

        debug!(
            total = records.len(),
            matched = matched.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Fetched API data"
        );
        Ok(matched)
    }

    /// Returns summary statistics over the whole dataset.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Source`] if the source fails.
    #[instrument(skip_all, fields(source = %self.source.describe()))]
    pub async fn fetch_summary_stats(&self) -> Result<SummaryStats, FetchError> {
        simulate(self.latency.summary).await;

        let records = self.source.load_records().await?;
        let stats = summarize(&records);

        debug!(total_apis = stats.total_apis, "Computed summary stats");
        Ok(stats)
    }

    /// Returns the coverage trend series.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Source`] if the source fails.
    #[instrument(skip_all, fields(source = %self.source.describe()))]
    pub async fn fetch_trend_data(&self) -> Result<Vec<TrendPoint>, FetchError> {
        simulate(self.latency.trend).await;

        let trend = self.source.load_trend().await?;

        debug!(points = trend.len(), "Fetched trend data");
        Ok(trend)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`DataService`].
#[derive(Debug)]
pub struct DataServiceBuilder<S> {
    source: S,
    latency: ServiceLatency,
    usage_thresholds: UsageThresholds,
}

impl<S: RecordSource> DataServiceBuilder<S> {
    /// Creates a builder with default latency and thresholds.
    pub fn new(source: S) -> Self {
        Self {
            source,
            latency: ServiceLatency::default(),
            usage_thresholds: UsageThresholds::default(),
        }
    }

    /// Sets the simulated latency.
    #[must_use]
    pub fn latency(mut self, latency: ServiceLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Disables simulated latency.
    #[must_use]
    pub fn without_latency(self) -> Self {
        self.latency(ServiceLatency::none())
    }

    /// Sets the usage thresholds.
    #[must_use]
    pub fn usage_thresholds(mut self, thresholds: UsageThresholds) -> Self {
        self.usage_thresholds = thresholds;
        self
    }

    /// Builds the service.
    pub fn build(self) -> DataService<S> {
        DataService {
            source: Arc::new(self.source),
            latency: self.latency,
            usage_thresholds: self.usage_thresholds,
        }
    }
}
