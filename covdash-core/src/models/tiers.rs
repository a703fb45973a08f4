//! Coverage tiers and usage buckets.
//!
//! Thresholds are plain configuration values so the filter engine and the
//! presentation layer share one definition of "high usage" or "well tested".

use serde::{Deserialize, Serialize};

// ============================================================================
// Usage Buckets
// ============================================================================

/// Usage-count thresholds for the high/medium/low buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageThresholds {
    /// Minimum usage count of the `high` bucket.
    pub high: u32,
    /// Minimum usage count of the `medium` bucket (exclusive upper bound of `low`).
    pub medium: u32,
}

impl UsageThresholds {
    /// Default lower bound of the `high` bucket.
    pub const DEFAULT_HIGH: u32 = 20;
    /// Default lower bound of the `medium` bucket.
    pub const DEFAULT_MEDIUM: u32 = 10;
}

impl Default for UsageThresholds {
    fn default() -> Self {
        Self {
            high: Self::DEFAULT_HIGH,
            medium: Self::DEFAULT_MEDIUM,
        }
    }
}

/// Categorical grouping of an API's usage count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageBucket {
    /// `usage_count >= high`.
    High,
    /// `medium <= usage_count < high`.
    Medium,
    /// `0 < usage_count < medium`.
    Low,
    /// No call sites.
    Unused,
}

impl UsageBucket {
    /// Returns all buckets, busiest first.
    pub fn all() -> &'static [UsageBucket] {
        &[
            UsageBucket::High,
            UsageBucket::Medium,
            UsageBucket::Low,
            UsageBucket::Unused,
        ]
    }

    /// Classifies a usage count.
    pub fn classify(usage_count: u32, thresholds: &UsageThresholds) -> Self {
        if usage_count == 0 {
            UsageBucket::Unused
        } else if usage_count >= thresholds.high {
            UsageBucket::High
        } else if usage_count >= thresholds.medium {
            UsageBucket::Medium
        } else {
            UsageBucket::Low
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            UsageBucket::High => "High usage",
            UsageBucket::Medium => "Medium usage",
            UsageBucket::Low => "Low usage",
            UsageBucket::Unused => "Unused",
        }
    }
}

// ============================================================================
// Coverage Tiers
// ============================================================================

/// Coverage-percentage thresholds for colour tiers and scatter quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverageThresholds {
    /// Minimum percentage of a well-tested API.
    pub high: u32,
    /// Minimum percentage of a partially tested API.
    pub medium: u32,
    /// Minimum usage percentage for an API to count as popular in the
    /// coverage-vs-usage scatter.
    pub popular_usage_percent: u32,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self {
            high: 80,
            medium: 60,
            popular_usage_percent: 10,
        }
    }
}

/// Display tier of a coverage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageTier {
    /// At or above the high threshold.
    High,
    /// At or above the medium threshold.
    Medium,
    /// Below the medium threshold.
    Low,
}

impl CoverageTier {
    /// Classifies a coverage percentage.
    pub fn classify(percentage: u32, thresholds: &CoverageThresholds) -> Self {
        if percentage >= thresholds.high {
            CoverageTier::High
        } else if percentage >= thresholds.medium {
            CoverageTier::Medium
        } else {
            CoverageTier::Low
        }
    }
}
