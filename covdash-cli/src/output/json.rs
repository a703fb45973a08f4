//! JSON output formatting.

use anyhow::Result;
use covdash_core::{
    usage_distribution, ActiveFilter, ApiRecord, CoverageThresholds, CoverageTier,
    DistributionBucket, FilterCriteria, Page, ScatterPoint, SortState, SummaryStats,
    UsageBucketCount, UsageThresholds,
};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// `summary` output: the summary cards plus breakdowns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOutput<'a> {
    #[serde(flatten)]
    pub stats: &'a SummaryStats,
    pub coverage_tiers: Vec<TierCountOutput>,
    pub usage_buckets: Vec<UsageBucketCount>,
}

impl<'a> SummaryOutput<'a> {
    /// Builds the output from stats and the full record set.
    pub fn new(
        stats: &'a SummaryStats,
        records: &[ApiRecord],
        coverage: &CoverageThresholds,
        usage: &UsageThresholds,
    ) -> Self {
        let coverage_tiers = [CoverageTier::High, CoverageTier::Medium, CoverageTier::Low]
            .into_iter()
            .map(|tier| TierCountOutput {
                tier,
                count: records
                    .iter()
                    .filter(|r| r.coverage_tier(coverage) == tier)
                    .count(),
            })
            .collect();

        Self {
            stats,
            coverage_tiers,
            usage_buckets: usage_distribution(records, usage),
        }
    }
}

/// Number of APIs in one coverage tier.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCountOutput {
    pub tier: CoverageTier,
    pub count: usize,
}

/// `list` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput<'a> {
    pub criteria: &'a FilterCriteria,
    pub active_filters: Vec<ActiveFilter>,
    pub sort: SortState,
    pub page: Page<'a, ApiRecord>,
}

/// `chart` output, tagged by chart kind.
#[derive(Debug, Serialize)]
#[serde(tag = "chart", content = "series", rename_all = "lowercase")]
pub enum ChartOutput {
    Coverage(Vec<DistributionBucket>),
    Usage(Vec<UsageBucketCount>),
    Scatter(Vec<ScatterPoint>),
}

/// One settled `explore` response; printed as a JSON line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput<'a> {
    pub query: &'a str,
    pub generation: u64,
    pub total: usize,
    pub records: &'a [ApiRecord],
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
