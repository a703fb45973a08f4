//! Chart series derived from a (filtered) record set.

use serde::Serialize;

use crate::models::{ApiRecord, CoverageThresholds, UsageBucket, UsageThresholds};

// ============================================================================
// Coverage Distribution
// ============================================================================

/// Inclusive percentage bounds of the coverage histogram bars.
pub const COVERAGE_BUCKETS: [(u32, u32); 5] = [(0, 20), (21, 40), (41, 60), (61, 80), (81, 100)];

/// One bar of the coverage histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBucket {
    /// Label such as `"21-40%"`.
    pub range: String,
    /// Inclusive lower bound.
    pub min: u32,
    /// Inclusive upper bound.
    pub max: u32,
    /// Number of APIs in the bucket.
    pub count: usize,
}

/// Counts APIs per coverage bucket.
pub fn coverage_distribution(records: &[ApiRecord]) -> Vec<DistributionBucket> {
    COVERAGE_BUCKETS
        .iter()
        .map(|&(min, max)| DistributionBucket {
            range: format!("{min}-{max}%"),
            min,
            max,
            count: records
                .iter()
                .filter(|r| (min..=max).contains(&r.coverage_percentage))
                .count(),
        })
        .collect()
}

// ============================================================================
// Usage Distribution
// ============================================================================

/// Number of APIs in one usage bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageBucketCount {
    /// The bucket.
    pub bucket: UsageBucket,
    /// Number of APIs in it.
    pub count: usize,
}

/// Counts APIs per usage bucket, busiest bucket first.
pub fn usage_distribution(
    records: &[ApiRecord],
    thresholds: &UsageThresholds,
) -> Vec<UsageBucketCount> {
    UsageBucket::all()
        .iter()
        .map(|&bucket| UsageBucketCount {
            bucket,
            count: records
                .iter()
                .filter(|r| r.usage_bucket(thresholds) == bucket)
                .count(),
        })
        .collect()
}

// ============================================================================
// Coverage vs Usage Scatter
// ============================================================================

/// Quadrant of the coverage-vs-usage scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    /// High coverage, popular.
    WellTestedPopular,
    /// High coverage, rarely used.
    WellTestedNiche,
    /// Low coverage, popular. The riskiest quadrant.
    UndertestedPopular,
    /// Low coverage, rarely used.
    UndertestedNiche,
}

impl Quadrant {
    /// Returns all quadrants, riskiest first.
    pub fn all() -> &'static [Quadrant] {
        &[
            Quadrant::UndertestedPopular,
            Quadrant::UndertestedNiche,
            Quadrant::WellTestedPopular,
            Quadrant::WellTestedNiche,
        ]
    }

    /// Classifies a coverage percentage and usage percentage.
    pub fn classify(coverage: u32, usage_percent: u32, thresholds: &CoverageThresholds) -> Self {
        let well_tested = coverage >= thresholds.high;
        let popular = usage_percent >= thresholds.popular_usage_percent;
        match (well_tested, popular) {
            (true, true) => Quadrant::WellTestedPopular,
            (true, false) => Quadrant::WellTestedNiche,
            (false, true) => Quadrant::UndertestedPopular,
            (false, false) => Quadrant::UndertestedNiche,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::WellTestedPopular => "High coverage, high usage",
            Quadrant::WellTestedNiche => "High coverage, low usage",
            Quadrant::UndertestedPopular => "Low coverage, high usage",
            Quadrant::UndertestedNiche => "Low coverage, low usage",
        }
    }
}

/// One bubble of the scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// API name.
    pub name: String,
    /// Coverage percentage (x axis).
    pub coverage: u32,
    /// Usage percentage (y axis).
    pub usage: u32,
    /// Bubble size: half the implementation size, at least 5. Odd sizes
    /// keep their half line.
    pub size: f64,
    /// Raw usage count.
    pub usage_count: u32,
    /// Covered lines.
    pub covered_lines: u32,
    /// Implementation size.
    pub full_size: u32,
    /// Quadrant classification.
    pub quadrant: Quadrant,
}

/// Smallest bubble size.
const MIN_BUBBLE_SIZE: f64 = 5.0;

/// Maps records to scatter points, keeping input order.
pub fn scatter_points(records: &[ApiRecord], thresholds: &CoverageThresholds) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| ScatterPoint {
            name: r.name.clone(),
            coverage: r.coverage_percentage,
            usage: r.usage_percentage,
            size: (f64::from(r.full_size) / 2.0).max(MIN_BUBBLE_SIZE),
            usage_count: r.usage_count,
            covered_lines: r.covered_lines,
            full_size: r.full_size,
            quadrant: Quadrant::classify(r.coverage_percentage, r.usage_percentage, thresholds),
        })
        .collect()
}
