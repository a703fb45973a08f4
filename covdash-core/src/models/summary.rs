//! Summary card and trend types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dashboard-wide statistics shown on the summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Number of tracked APIs.
    pub total_apis: usize,
    /// Rounded mean of the coverage percentages, 0 for an empty set.
    pub average_coverage: u32,
    /// Sum of all usage counts.
    pub total_usage: u64,
    /// Most recent `last_updated` date, absent for an empty set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl SummaryStats {
    /// Returns true if no APIs were summarized.
    pub fn is_empty(&self) -> bool {
        self.total_apis == 0
    }
}

/// One point of the coverage trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Sample date.
    pub date: NaiveDate,
    /// Average coverage percentage on that date.
    pub coverage: u32,
    /// Number of tracked APIs on that date.
    pub apis: u32,
}

impl TrendPoint {
    /// Creates a trend point.
    pub fn new(date: NaiveDate, coverage: u32, apis: u32) -> Self {
        Self {
            date,
            coverage,
            apis,
        }
    }
}
