//! Filter criteria.
//!
//! [`FilterCriteria`] is owned by the presentation layer and passed by value
//! on every query; the engine never keeps filter state between calls.
//!
//! Out-of-order bounds (`min > max`) are not rejected. Both
//! [`CoverageRange::normalized`] and [`DateRange::normalized`] swap them, and
//! the engine always filters with the normalized ranges.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tiers::{UsageBucket, UsageThresholds};
use crate::error::CoreError;

// ============================================================================
// Usage Filter
// ============================================================================

/// Usage predicate selected by the user.
///
/// The dashboard historically exposed two vocabularies (`all|used|unused`
/// in the filter panel and `all|high|medium|low|unused` in the quick filter
/// bar). This enum is their union; `used` is equivalent to
/// `high ∪ medium ∪ low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageFilter {
    /// No filtering.
    #[default]
    All,
    /// `usage_count > 0`.
    Used,
    /// `usage_count == 0`.
    Unused,
    /// `usage_count >= high` threshold.
    High,
    /// `medium <= usage_count < high`.
    Medium,
    /// `0 < usage_count < medium`.
    Low,
}

impl UsageFilter {
    /// Returns all filter values.
    pub fn all() -> &'static [UsageFilter] {
        &[
            UsageFilter::All,
            UsageFilter::Used,
            UsageFilter::Unused,
            UsageFilter::High,
            UsageFilter::Medium,
            UsageFilter::Low,
        ]
    }

    /// Returns true if a record with `usage_count` passes this filter.
    pub fn matches(self, usage_count: u32, thresholds: &UsageThresholds) -> bool {
        match self {
            UsageFilter::All => true,
            UsageFilter::Used => usage_count > 0,
            UsageFilter::Unused => usage_count == 0,
            UsageFilter::High => {
                UsageBucket::classify(usage_count, thresholds) == UsageBucket::High
            }
            UsageFilter::Medium => {
                UsageBucket::classify(usage_count, thresholds) == UsageBucket::Medium
            }
            UsageFilter::Low => UsageBucket::classify(usage_count, thresholds) == UsageBucket::Low,
        }
    }

    /// Lowercase identifier used on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            UsageFilter::All => "all",
            UsageFilter::Used => "used",
            UsageFilter::Unused => "unused",
            UsageFilter::High => "high",
            UsageFilter::Medium => "medium",
            UsageFilter::Low => "low",
        }
    }

    /// Label shown in the active-filter summary.
    pub fn label(self) -> &'static str {
        match self {
            UsageFilter::All => "All APIs",
            UsageFilter::Used => "Used APIs",
            UsageFilter::Unused => "Unused APIs",
            UsageFilter::High => "High usage",
            UsageFilter::Medium => "Medium usage",
            UsageFilter::Low => "Low usage",
        }
    }
}

impl fmt::Display for UsageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        UsageFilter::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| CoreError::InvalidCriteria(format!("unknown usage filter: {s}")))
    }
}

// ============================================================================
// Ranges
// ============================================================================

/// Closed interval `[min, max]` over coverage percentage.
///
/// Serialized as a two-element array, e.g. `[80, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct CoverageRange {
    /// Inclusive lower bound.
    pub min: u32,
    /// Inclusive upper bound.
    pub max: u32,
}

impl CoverageRange {
    /// The unrestricted range `[0, 100]`.
    pub const FULL: CoverageRange = CoverageRange { min: 0, max: 100 };

    /// Creates a range; bounds are kept as given.
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Returns the range with its bounds in ascending order.
    pub fn normalized(self) -> Self {
        if self.min > self.max {
            Self::new(self.max, self.min)
        } else {
            self
        }
    }

    /// Inclusive containment check on the normalized range.
    pub fn contains(&self, percentage: u32) -> bool {
        let range = self.normalized();
        range.min <= percentage && percentage <= range.max
    }

    /// Returns true if this range restricts anything within `[0, 100]`.
    pub fn is_restrictive(&self) -> bool {
        let range = self.normalized();
        range.min > 0 || range.max < 100
    }
}

impl Default for CoverageRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<[u32; 2]> for CoverageRange {
    fn from([min, max]: [u32; 2]) -> Self {
        Self::new(min, max)
    }
}

impl From<CoverageRange> for [u32; 2] {
    fn from(range: CoverageRange) -> Self {
        [range.min, range.max]
    }
}

/// Closed interval over `last_updated` dates.
///
/// Serialized as a two-element array of ISO dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[NaiveDate; 2]", into = "[NaiveDate; 2]")]
pub struct DateRange {
    /// Inclusive start date.
    pub start: NaiveDate,
    /// Inclusive end date.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range; bounds are kept as given.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns the range with its bounds in ascending order.
    pub fn normalized(self) -> Self {
        if self.start > self.end {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }

    /// Inclusive containment check on the normalized range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let range = self.normalized();
        range.start <= date && date <= range.end
    }
}

impl From<[NaiveDate; 2]> for DateRange {
    fn from([start, end]: [NaiveDate; 2]) -> Self {
        Self::new(start, end)
    }
}

impl From<DateRange> for [NaiveDate; 2] {
    fn from(range: DateRange) -> Self {
        [range.start, range.end]
    }
}

// ============================================================================
// Filter Criteria
// ============================================================================

/// The full set of user-selected filters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Coverage percentage interval.
    pub coverage_range: CoverageRange,
    /// Usage predicate.
    pub usage_filter: UsageFilter,
    /// Case-insensitive substring over name and documentation.
    pub search_query: String,
    /// Inclusive `last_updated` interval; `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    /// Criteria that match every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the coverage range.
    #[must_use]
    pub fn with_coverage(mut self, min: u32, max: u32) -> Self {
        self.coverage_range = CoverageRange::new(min, max);
        self
    }

    /// Sets the usage filter.
    #[must_use]
    pub fn with_usage(mut self, usage_filter: UsageFilter) -> Self {
        self.usage_filter = usage_filter;
        self
    }

    /// Sets the search query.
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Sets the date range.
    #[must_use]
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    /// Returns a copy with both ranges normalized.
    ///
    /// The search query is kept verbatim: whitespace is part of the substring.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            coverage_range: self.coverage_range.normalized(),
            usage_filter: self.usage_filter,
            search_query: self.search_query.clone(),
            date_range: self.date_range.map(DateRange::normalized),
        }
    }

    /// Applies a quick-filter preset on top of the current criteria.
    pub fn apply_preset(&mut self, preset: QuickFilter) {
        match preset {
            QuickFilter::HighCoverageUsed => {
                self.coverage_range = CoverageRange::new(80, 100);
                self.usage_filter = UsageFilter::Used;
            }
            QuickFilter::LowCoverageUsed => {
                self.coverage_range = CoverageRange::new(0, 50);
                self.usage_filter = UsageFilter::Used;
            }
            QuickFilter::Unused => {
                self.usage_filter = UsageFilter::Unused;
            }
        }
    }

    /// Resets one filter to its default value.
    pub fn clear(&mut self, key: FilterKey) {
        match key {
            FilterKey::CoverageRange => self.coverage_range = CoverageRange::FULL,
            FilterKey::UsageFilter => self.usage_filter = UsageFilter::All,
            FilterKey::SearchQuery => self.search_query.clear(),
            FilterKey::DateRange => self.date_range = None,
        }
    }

    /// Lists the filters that differ from their defaults, in display order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();

        if self.coverage_range.is_restrictive() {
            let range = self.coverage_range.normalized();
            active.push(ActiveFilter {
                key: FilterKey::CoverageRange,
                label: format!("Coverage: {}%-{}%", range.min, range.max),
            });
        }

        if self.usage_filter != UsageFilter::All {
            active.push(ActiveFilter {
                key: FilterKey::UsageFilter,
                label: self.usage_filter.label().to_string(),
            });
        }

        if !self.search_query.is_empty() {
            active.push(ActiveFilter {
                key: FilterKey::SearchQuery,
                label: format!("Search: \"{}\"", self.search_query),
            });
        }

        if let Some(range) = self.date_range {
            let range = range.normalized();
            active.push(ActiveFilter {
                key: FilterKey::DateRange,
                label: format!("Date: {} to {}", range.start, range.end),
            });
        }

        active
    }

    /// Returns true if any filter differs from its default.
    pub fn has_active_filters(&self) -> bool {
        !self.active_filters().is_empty()
    }
}

/// Identifies one of the four filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    /// The coverage range.
    CoverageRange,
    /// The usage filter.
    UsageFilter,
    /// The search query.
    SearchQuery,
    /// The date range.
    DateRange,
}

/// A filter that differs from its default, with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    /// Which filter is active.
    pub key: FilterKey,
    /// Human-readable description.
    pub label: String,
}

/// One-click presets offered next to the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickFilter {
    /// Coverage 80-100% and at least one call site.
    HighCoverageUsed,
    /// Coverage 0-50% and at least one call site.
    LowCoverageUsed,
    /// No call sites.
    Unused,
}

impl FromStr for QuickFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high-coverage-used" => Ok(QuickFilter::HighCoverageUsed),
            "low-coverage-used" => Ok(QuickFilter::LowCoverageUsed),
            "unused" => Ok(QuickFilter::Unused),
            other => Err(CoreError::InvalidCriteria(format!(
                "unknown quick filter: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_usage_filter_matches() {
        let t = UsageThresholds::default();
        assert!(UsageFilter::All.matches(0, &t));
        assert!(UsageFilter::Used.matches(1, &t));
        assert!(!UsageFilter::Used.matches(0, &t));
        assert!(UsageFilter::Unused.matches(0, &t));
        assert!(UsageFilter::High.matches(20, &t));
        assert!(!UsageFilter::High.matches(19, &t));
        assert!(UsageFilter::Medium.matches(10, &t));
        assert!(!UsageFilter::Medium.matches(20, &t));
        assert!(UsageFilter::Low.matches(9, &t));
        assert!(!UsageFilter::Low.matches(0, &t));
    }

    #[test]
    fn test_usage_filter_from_str() {
        assert_eq!("HIGH".parse::<UsageFilter>().unwrap(), UsageFilter::High);
        assert_eq!(" unused ".parse::<UsageFilter>().unwrap(), UsageFilter::Unused);
        assert!("sometimes".parse::<UsageFilter>().is_err());
    }

    #[test]
    fn test_coverage_range_swaps_inverted_bounds() {
        let range = CoverageRange::new(90, 10);
        assert_eq!(range.normalized(), CoverageRange::new(10, 90));
        assert!(range.contains(50));
        assert!(range.contains(10));
        assert!(range.contains(90));
        assert!(!range.contains(91));
    }

    #[test]
    fn test_date_range_inclusive() {
        let range = DateRange::new(ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert!(range.contains(ymd(2024, 1, 1)));
        assert!(range.contains(ymd(2024, 1, 31)));
        assert!(!range.contains(ymd(2024, 2, 1)));

        let inverted = DateRange::new(ymd(2024, 1, 31), ymd(2024, 1, 1));
        assert!(inverted.contains(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_default_criteria_has_no_active_filters() {
        let criteria = FilterCriteria::default();
        assert!(!criteria.has_active_filters());
        assert_eq!(criteria.coverage_range, CoverageRange::FULL);
    }

    #[test]
    fn test_active_filter_labels() {
        let criteria = FilterCriteria::new()
            .with_coverage(80, 100)
            .with_usage(UsageFilter::Used)
            .with_search("frame")
            .with_date_range(ymd(2024, 1, 1), ymd(2024, 12, 31));

        let labels: Vec<_> = criteria
            .active_filters()
            .into_iter()
            .map(|f| f.label)
            .collect();

        assert_eq!(
            labels,
            vec![
                "Coverage: 80%-100%".to_string(),
                "Used APIs".to_string(),
                "Search: \"frame\"".to_string(),
                "Date: 2024-01-01 to 2024-12-31".to_string(),
            ]
        );
    }

    #[test]
    fn test_whitespace_query_is_an_active_filter() {
        let criteria = FilterCriteria::new().with_search("alloc ");
        assert_eq!(criteria.normalized().search_query, "alloc ");

        let active = criteria.active_filters();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Search: \"alloc \"");

        assert!(FilterCriteria::new().with_search(" ").has_active_filters());
    }

    #[test]
    fn test_clear_single_filter() {
        let mut criteria = FilterCriteria::new()
            .with_coverage(0, 50)
            .with_search("sws");

        criteria.clear(FilterKey::SearchQuery);
        assert!(criteria.search_query.is_empty());
        assert_eq!(criteria.coverage_range, CoverageRange::new(0, 50));

        criteria.clear(FilterKey::CoverageRange);
        assert!(!criteria.has_active_filters());
    }

    #[test]
    fn test_quick_filter_presets() {
        let mut criteria = FilterCriteria::new().with_search("av_");
        criteria.apply_preset(QuickFilter::HighCoverageUsed);
        assert_eq!(criteria.coverage_range, CoverageRange::new(80, 100));
        assert_eq!(criteria.usage_filter, UsageFilter::Used);
        assert_eq!(criteria.search_query, "av_");

        criteria.apply_preset(QuickFilter::Unused);
        assert_eq!(criteria.usage_filter, UsageFilter::Unused);
        // Unused leaves the coverage range alone
        assert_eq!(criteria.coverage_range, CoverageRange::new(80, 100));
    }

    #[test]
    fn test_criteria_json_shape() {
        let criteria = FilterCriteria::new()
            .with_coverage(80, 100)
            .with_usage(UsageFilter::Used);
        let json = serde_json::to_value(&criteria).unwrap();

        assert_eq!(json["coverageRange"], serde_json::json!([80, 100]));
        assert_eq!(json["usageFilter"], "used");
        assert_eq!(json["searchQuery"], "");
        assert!(json.get("dateRange").is_none());
    }

    #[test]
    fn test_criteria_deserialize_partial() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"usageFilter":"high","dateRange":["2024-01-01","2024-06-30"]}"#)
                .unwrap();

        assert_eq!(criteria.usage_filter, UsageFilter::High);
        assert_eq!(criteria.coverage_range, CoverageRange::FULL);
        assert_eq!(
            criteria.date_range,
            Some(DateRange::new(ymd(2024, 1, 1), ymd(2024, 6, 30)))
        );
    }
}
