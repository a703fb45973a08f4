//! Filter predicates and summary statistics.

use crate::models::{
    ApiRecord, CoverageRange, DateRange, FilterCriteria, SummaryStats, UsageFilter,
    UsageThresholds,
};

/// Compiled form of a [`FilterCriteria`].
///
/// Ranges are normalized and the search query is lowercased once, so
/// matching a record costs no allocation beyond the substring search.
#[derive(Debug, Clone)]
pub struct RecordPredicate {
    coverage: CoverageRange,
    usage: UsageFilter,
    thresholds: UsageThresholds,
    dates: Option<DateRange>,
    needle: String,
}

impl RecordPredicate {
    /// Compiles criteria with the given usage thresholds.
    pub fn new(criteria: &FilterCriteria, thresholds: UsageThresholds) -> Self {
        let criteria = criteria.normalized();
        Self {
            coverage: criteria.coverage_range,
            usage: criteria.usage_filter,
            thresholds,
            dates: criteria.date_range,
            needle: criteria.search_query.to_lowercase(),
        }
    }

    /// Returns true if the record passes all four predicates.
    ///
    /// Numeric checks run before the substring search.
    pub fn matches(&self, record: &ApiRecord) -> bool {
        self.coverage.contains(record.coverage_percentage)
            && self.usage.matches(record.usage_count, &self.thresholds)
            && self.dates.is_none_or(|range| range.contains(record.last_updated))
            && record.matches_lowercase(&self.needle)
    }
}

/// Filters records with the default usage thresholds.
///
/// The result keeps the input's relative order.
pub fn filter(records: &[ApiRecord], criteria: &FilterCriteria) -> Vec<ApiRecord> {
    filter_with(records, criteria, UsageThresholds::default())
}

/// Filters records with explicit usage thresholds.
pub fn filter_with(
    records: &[ApiRecord],
    criteria: &FilterCriteria,
    thresholds: UsageThresholds,
) -> Vec<ApiRecord> {
    let predicate = RecordPredicate::new(criteria, thresholds);
    records
        .iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect()
}

/// Reduces records to the summary-card statistics.
pub fn summarize(records: &[ApiRecord]) -> SummaryStats {
    let total_apis = records.len();
    let coverage_sum: u64 = records
        .iter()
        .map(|r| u64::from(r.coverage_percentage))
        .sum();
    let total_usage: u64 = records.iter().map(|r| u64::from(r.usage_count)).sum();

    let average_coverage = if total_apis == 0 {
        0
    } else {
        let n = total_apis as u64;
        // round half up
        u32::try_from((coverage_sum * 2 + n) / (n * 2)).unwrap_or(u32::MAX)
    };

    SummaryStats {
        total_apis,
        average_coverage,
        total_usage,
        last_updated: records.iter().map(|r| r.last_updated).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(name: &str, covered: u32, usage: u32, date: NaiveDate) -> ApiRecord {
        ApiRecord::builder(name)
            .lines(100, covered)
            .usage(usage, 604)
            .documentation(format!("Docs for {name}"))
            .last_updated(date)
            .build()
    }

    fn sample() -> Vec<ApiRecord> {
        vec![
            record("av_frame_alloc", 100, 25, ymd(2024, 3, 1)),
            record("av_adts_header_parse", 0, 0, ymd(2024, 2, 1)),
            record("sws_scale", 55, 12, ymd(2024, 1, 15)),
            record("av_strdup", 85, 3, ymd(2024, 3, 10)),
        ]
    }

    fn names(records: &[ApiRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_default_criteria_keeps_everything() {
        let records = sample();
        assert_eq!(filter(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn test_coverage_range_inclusive() {
        let records = sample();
        let criteria = FilterCriteria::new().with_coverage(55, 85);
        assert_eq!(names(&filter(&records, &criteria)), vec!["sws_scale", "av_strdup"]);
    }

    #[test]
    fn test_inverted_coverage_range_is_swapped() {
        let records = sample();
        let criteria = FilterCriteria::new().with_coverage(85, 55);
        assert_eq!(names(&filter(&records, &criteria)), vec!["sws_scale", "av_strdup"]);
    }

    #[test]
    fn test_usage_buckets() {
        let records = sample();
        let by = |usage| names(&filter(&records, &FilterCriteria::new().with_usage(usage)))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        assert_eq!(by(UsageFilter::High), vec!["av_frame_alloc"]);
        assert_eq!(by(UsageFilter::Medium), vec!["sws_scale"]);
        assert_eq!(by(UsageFilter::Low), vec!["av_strdup"]);
        assert_eq!(by(UsageFilter::Unused), vec!["av_adts_header_parse"]);
        assert_eq!(
            by(UsageFilter::Used),
            vec!["av_frame_alloc", "sws_scale", "av_strdup"]
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let records = sample();
        let criteria = FilterCriteria::new().with_usage(UsageFilter::High);
        let thresholds = UsageThresholds { high: 10, medium: 2 };
        assert_eq!(
            names(&filter_with(&records, &criteria, thresholds)),
            vec!["av_frame_alloc", "sws_scale"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = sample();
        let criteria = FilterCriteria::new().with_search("SWS");
        assert_eq!(names(&filter(&records, &criteria)), vec!["sws_scale"]);

        let criteria = FilterCriteria::new().with_search("docs for av_str");
        assert_eq!(names(&filter(&records, &criteria)), vec!["av_strdup"]);
    }

    #[test]
    fn test_search_whitespace_is_literal() {
        let records = sample();

        // No name or documentation has a space after "alloc"
        let criteria = FilterCriteria::new().with_search("alloc ");
        assert!(filter(&records, &criteria).is_empty());

        let criteria = FilterCriteria::new().with_search("\t");
        assert!(filter(&records, &criteria).is_empty());

        let criteria = FilterCriteria::new().with_search(" for av_s");
        assert_eq!(names(&filter(&records, &criteria)), vec!["av_strdup"]);
    }

    #[test]
    fn test_date_range_inclusive() {
        let records = sample();
        let criteria = FilterCriteria::new().with_date_range(ymd(2024, 2, 1), ymd(2024, 3, 1));
        assert_eq!(
            names(&filter(&records, &criteria)),
            vec!["av_frame_alloc", "av_adts_header_parse"]
        );
    }

    #[test]
    fn test_predicates_are_anded() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_coverage(80, 100)
            .with_usage(UsageFilter::Used)
            .with_search("av_");
        assert_eq!(
            names(&filter(&records, &criteria)),
            vec!["av_frame_alloc", "av_strdup"]
        );
    }

    #[test]
    fn test_summarize() {
        let stats = summarize(&sample());
        assert_eq!(stats.total_apis, 4);
        // (100 + 0 + 55 + 85) / 4 = 60
        assert_eq!(stats.average_coverage, 60);
        assert_eq!(stats.total_usage, 40);
        assert_eq!(stats.last_updated, Some(ymd(2024, 3, 10)));
    }

    #[test]
    fn test_summarize_rounds_mean() {
        let records = vec![
            record("a", 50, 0, ymd(2024, 1, 1)),
            record("b", 51, 0, ymd(2024, 1, 1)),
        ];
        // 50.5 rounds up
        assert_eq!(summarize(&records).average_coverage, 51);
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[]);
        assert_eq!(stats, SummaryStats::default());
        assert!(stats.is_empty());
    }
}
