//! Per-API coverage and usage records.
//!
//! An [`ApiRecord`] combines the static coverage metrics of one API with
//! its usage metrics across all known clients. The two percentage fields are
//! derived at construction time and are never trusted from input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tiers::{CoverageThresholds, CoverageTier, UsageBucket, UsageThresholds};

// ============================================================================
// Percentages
// ============================================================================

/// Computes `round(part / whole * 100)` using integer arithmetic.
///
/// Halves round up, matching the dashboard's rounding of non-negative values.
/// Returns 0 when `whole` is 0 instead of producing NaN or infinity.
pub fn percent_of(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part);
    let whole = u64::from(whole);
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

// ============================================================================
// Api Record
// ============================================================================

/// Coverage and usage statistics for a single tracked API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RecordFields")]
pub struct ApiRecord {
    /// Unique API identifier (e.g. `av_frame_alloc`).
    pub name: String,
    /// Total lines of code in the API's implementation.
    pub full_size: u32,
    /// Lines exercised by tests, never greater than `full_size`.
    pub covered_lines: u32,
    /// Derived: `round(covered_lines / full_size * 100)`, 0 for empty APIs.
    pub coverage_percentage: u32,
    /// Number of call sites across all clients.
    pub usage_count: u32,
    /// Size of the client population.
    pub total_clients: u32,
    /// Derived: `round(usage_count / total_clients * 100)`.
    pub usage_percentage: u32,
    /// Free-text API documentation.
    pub documentation: String,
    /// Calendar date of the last update.
    pub last_updated: NaiveDate,
}

impl ApiRecord {
    /// Starts building a record for the named API.
    pub fn builder(name: impl Into<String>) -> ApiRecordBuilder {
        ApiRecordBuilder::new(name)
    }

    /// Returns true if at least one client calls this API.
    pub fn is_used(&self) -> bool {
        self.usage_count > 0
    }

    /// Number of lines not exercised by tests.
    pub fn uncovered_lines(&self) -> u32 {
        self.full_size.saturating_sub(self.covered_lines)
    }

    /// Classifies the coverage percentage into a display tier.
    pub fn coverage_tier(&self, thresholds: &CoverageThresholds) -> CoverageTier {
        CoverageTier::classify(self.coverage_percentage, thresholds)
    }

    /// Classifies the usage count into a usage bucket.
    pub fn usage_bucket(&self, thresholds: &UsageThresholds) -> UsageBucket {
        UsageBucket::classify(self.usage_count, thresholds)
    }

    /// Case-insensitive substring match on name and documentation.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.documentation.to_lowercase().contains(needle)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ApiRecord`] that derives the percentage fields.
#[derive(Debug, Clone)]
pub struct ApiRecordBuilder {
    name: String,
    full_size: u32,
    covered_lines: u32,
    usage_count: u32,
    total_clients: u32,
    documentation: String,
    last_updated: NaiveDate,
}

impl ApiRecordBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_size: 0,
            covered_lines: 0,
            usage_count: 0,
            total_clients: 0,
            documentation: String::new(),
            last_updated: NaiveDate::default(),
        }
    }

    /// Sets the implementation size and the covered line count.
    pub fn lines(mut self, full_size: u32, covered_lines: u32) -> Self {
        self.full_size = full_size;
        self.covered_lines = covered_lines;
        self
    }

    /// Sets the usage count and client population.
    pub fn usage(mut self, usage_count: u32, total_clients: u32) -> Self {
        self.usage_count = usage_count;
        self.total_clients = total_clients;
        self
    }

    /// Sets the documentation text.
    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Sets the last-updated date.
    pub fn last_updated(mut self, date: NaiveDate) -> Self {
        self.last_updated = date;
        self
    }

    /// Builds the record.
    ///
    /// `covered_lines` is clamped to `full_size`, so the coverage percentage
    /// always lies in `[0, 100]`.
    pub fn build(self) -> ApiRecord {
        let covered_lines = self.covered_lines.min(self.full_size);
        ApiRecord {
            coverage_percentage: percent_of(covered_lines, self.full_size),
            usage_percentage: percent_of(self.usage_count, self.total_clients),
            name: self.name,
            full_size: self.full_size,
            covered_lines,
            usage_count: self.usage_count,
            total_clients: self.total_clients,
            documentation: self.documentation,
            last_updated: self.last_updated,
        }
    }
}

/// Serialized shape of a record; derived fields in the input are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    name: String,
    full_size: u32,
    covered_lines: u32,
    #[serde(default)]
    usage_count: u32,
    #[serde(default)]
    total_clients: u32,
    #[serde(default)]
    documentation: String,
    last_updated: NaiveDate,
}

impl From<RecordFields> for ApiRecord {
    fn from(fields: RecordFields) -> Self {
        ApiRecord::builder(fields.name)
            .lines(fields.full_size, fields.covered_lines)
            .usage(fields.usage_count, fields.total_clients)
            .documentation(fields.documentation)
            .last_updated(fields.last_updated)
            .build()
    }
}

// ============================================================================
// Tests
// ============================================================================
