//! The aggregation, filter, sort, and paginate engine.
//!
//! Every function here is synchronous and pure: inputs are borrowed, never
//! mutated, and results are new sequences (or borrowed views for pages).
//!
//! - [`filter`] - Filter predicates and summary statistics
//! - [`sort`] - Stable ordering by a chosen field and direction
//! - [`paginate`] - Pages and virtualization windows over an ordered sequence
//! - [`charts`] - Chart series (coverage histogram, usage buckets, scatter)

pub mod charts;
pub mod filter;
pub mod paginate;
pub mod sort;

pub use charts::{
    coverage_distribution, scatter_points, usage_distribution, DistributionBucket, Quadrant,
    ScatterPoint, UsageBucketCount,
};
pub use filter::{filter, filter_with, summarize, RecordPredicate};
pub use paginate::{pages, paginate, total_pages, visible_window, Page, Window};
pub use sort::{locale_compare, sort, sort_in_place, SortDirection, SortField, SortState};
