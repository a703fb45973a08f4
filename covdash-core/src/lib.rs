// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `CovDash` Core
//!
//! Core types, the record-source trait, and the pure data engine for the
//! `CovDash` API coverage dashboard.
//!
//! This crate provides the foundational abstractions used across all other
//! `CovDash` crates, including:
//!
//! - Domain models (API records, filter criteria, summary statistics)
//! - Error types
//! - The [`RecordSource`] trait implemented by dataset backends
//! - The engine: filter, summarize, sort, paginate, and chart series
//!
//! ## Key Types
//!
//! ### Records
//! - [`ApiRecord`] - Coverage and usage of one API
//! - [`SummaryStats`] - Summary card statistics
//! - [`TrendPoint`] - One point of the coverage trend
//!
//! ### Filtering
//! - [`FilterCriteria`] - Coverage range, usage filter, search, date range
//! - [`UsageFilter`] - Canonical usage predicate vocabulary
//! - [`UsageThresholds`] - Configurable high/medium usage thresholds
//!
//! ### Ordering
//! - [`SortField`], [`SortDirection`], [`SortState`]
//! - [`Page`], [`Window`]
//!
//! ## Example
//!
//! ```
//! use covdash_core::{filter, paginate, sort, ApiRecord, FilterCriteria, SortDirection, SortField, UsageFilter};
//!
//! let records = vec![
//!     ApiRecord::builder("B").lines(10, 1).usage(0, 604).build(),
//!     ApiRecord::builder("A").lines(10, 9).usage(25, 604).build(),
//! ];
//!
//! let used = filter(&records, &FilterCriteria::new().with_usage(UsageFilter::Used));
//! let ordered = sort(&used, SortField::Name, SortDirection::Asc);
//! let page = paginate(&ordered, 50, 0);
//! assert_eq!(page.items[0].name, "A");
//! ```

pub mod engine;
pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Records
    percent_of,
    ApiRecord,
    ApiRecordBuilder,
    SummaryStats,
    TrendPoint,
    // Filtering
    ActiveFilter,
    CoverageRange,
    DateRange,
    FilterCriteria,
    FilterKey,
    QuickFilter,
    UsageFilter,
    // Tiers
    CoverageThresholds,
    CoverageTier,
    UsageBucket,
    UsageThresholds,
};

// Re-export the engine
pub use engine::{
    coverage_distribution, filter, filter_with, locale_compare, pages, paginate, scatter_points,
    sort, sort_in_place, summarize, total_pages, usage_distribution, visible_window,
    DistributionBucket, Page, Quadrant, RecordPredicate, ScatterPoint, SortDirection, SortField,
    SortState, UsageBucketCount, Window,
};

// Re-export traits
pub use traits::RecordSource;
