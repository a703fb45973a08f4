//! Stable ordering of records.
//!
//! Descending order uses the ascending comparator with its result reversed
//! and goes through the same stable sort. With distinct keys, `desc` is the
//! exact reverse of `asc`; with ties, both directions keep the input order
//! of equal elements.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::ApiRecord;

// ============================================================================
// Sort Field & Direction
// ============================================================================

/// Column a table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// API name, locale-aware.
    #[default]
    Name,
    /// Coverage percentage.
    CoveragePercentage,
    /// Usage count.
    UsageCount,
    /// Implementation size in lines.
    FullSize,
}

impl SortField {
    /// Returns all sortable fields.
    pub fn all() -> &'static [SortField] {
        &[
            SortField::Name,
            SortField::CoveragePercentage,
            SortField::UsageCount,
            SortField::FullSize,
        ]
    }

    /// Identifier accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CoveragePercentage => "coverage",
            SortField::UsageCount => "usage",
            SortField::FullSize => "size",
        }
    }

    /// Compares two records on this field in ascending order.
    pub fn compare(self, a: &ApiRecord, b: &ApiRecord) -> Ordering {
        match self {
            SortField::Name => locale_compare(&a.name, &b.name),
            SortField::CoveragePercentage => a.coverage_percentage.cmp(&b.coverage_percentage),
            SortField::UsageCount => a.usage_count.cmp(&b.usage_count),
            SortField::FullSize => a.full_size.cmp(&b.full_size),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "coverage" | "coveragepercentage" => Ok(SortField::CoveragePercentage),
            "usage" | "usagecount" => Ok(SortField::UsageCount),
            "size" | "fullsize" => Ok(SortField::FullSize),
            other => Err(CoreError::InvalidCriteria(format!("unknown sort field: {other}"))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Current table ordering, driven by column header clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Active column.
    pub field: SortField,
    /// Active direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Creates a sort state.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Handles a click on a column header.
    ///
    /// Clicking the active column flips the direction; clicking another
    /// column selects it in ascending order.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }

    /// Returns a sorted copy of `records` in this state's order.
    pub fn apply(&self, records: &[ApiRecord]) -> Vec<ApiRecord> {
        sort(records, self.field, self.direction)
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Locale-aware string comparison.
///
/// Strings are compared case-insensitively first; when they differ only in
/// case, the first differing character that is lowercase sorts first
/// (`"abc" < "Abc"`), and finally by code point.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map_or(Ordering::Equal, |(x, y)| {
                    y.is_lowercase().cmp(&x.is_lowercase())
                })
        })
        .then_with(|| a.cmp(b))
}

/// Returns a stably sorted copy of `records`.
pub fn sort(records: &[ApiRecord], field: SortField, direction: SortDirection) -> Vec<ApiRecord> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, field, direction);
    sorted
}

/// Stably sorts `records` in place.
pub fn sort_in_place(records: &mut [ApiRecord], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| direction.apply(field.compare(a, b)));
}
