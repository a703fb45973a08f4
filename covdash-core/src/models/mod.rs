//! Domain models for CovDash.
//!
//! ## Submodules
//!
//! - [`record`] - Per-API records (ApiRecord, builder, percentage helper)
//! - [`filter`] - Filter criteria (FilterCriteria, UsageFilter, ranges, presets)
//! - [`tiers`] - Usage buckets and coverage tiers with their thresholds
//! - [`summary`] - Summary statistics and trend points

mod filter;
mod record;
mod summary;
mod tiers;

pub use filter::{
    ActiveFilter, CoverageRange, DateRange, FilterCriteria, FilterKey, QuickFilter, UsageFilter,
};
pub use record::{percent_of, ApiRecord, ApiRecordBuilder};
pub use summary::{SummaryStats, TrendPoint};
pub use tiers::{CoverageThresholds, CoverageTier, UsageBucket, UsageThresholds};
