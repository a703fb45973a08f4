//! Integration tests for the filter, summarize, sort, and paginate engine.

use chrono::NaiveDate;
use covdash_core::{
    filter, pages, paginate, sort, summarize, ApiRecord, FilterCriteria, SortDirection, SortField,
    SummaryStats, UsageFilter,
};
use proptest::prelude::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builds a record with an exact coverage percentage (100-line API).
fn record(name: &str, coverage: u32, usage: u32) -> ApiRecord {
    ApiRecord::builder(name)
        .lines(100, coverage)
        .usage(usage, 604)
        .documentation(format!("Documentation for {name}"))
        .last_updated(ymd(2024, 3, 1))
        .build()
}

fn names(records: &[ApiRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_high_coverage_used_scenario() {
    let records = vec![record("A", 90, 25), record("B", 10, 0)];
    let criteria = FilterCriteria::new()
        .with_coverage(80, 100)
        .with_usage(UsageFilter::Used)
        .with_search("")
        .with_date_range(NaiveDate::MIN, NaiveDate::MAX);

    assert_eq!(names(&filter(&records, &criteria)), vec!["A"]);
}

#[test]
fn test_name_sort_scenario() {
    let records = vec![record("B", 0, 0), record("A", 0, 0)];
    assert_eq!(names(&sort(&records, SortField::Name, SortDirection::Asc)), vec!["A", "B"]);
    assert_eq!(names(&sort(&records, SortField::Name, SortDirection::Desc)), vec!["B", "A"]);
}

#[test]
fn test_last_page_of_23_scenario() {
    let records: Vec<ApiRecord> = (0..23).map(|i| record(&format!("api_{i:02}"), 50, i)).collect();
    let page = paginate(&records, 10, 2);
    assert_eq!(page.items, &records[20..23]);
}

#[test]
fn test_empty_summary() {
    let stats = summarize(&[]);
    assert_eq!(
        stats,
        SummaryStats {
            total_apis: 0,
            average_coverage: 0,
            total_usage: 0,
            last_updated: None,
        }
    );
}

#[test]
fn test_filter_then_sort_then_page_pipeline() {
    let records: Vec<ApiRecord> = (0..30u32).map(|i| record(&format!("api_{i:02}"), i * 3, i % 7)).collect();

    let filtered = filter(&records, &FilterCriteria::new().with_usage(UsageFilter::Used));
    let ordered = sort(&filtered, SortField::CoveragePercentage, SortDirection::Desc);
    let first = paginate(&ordered, 10, 0);

    assert_eq!(first.total_items, filtered.len());
    assert!(first.items.iter().all(|r| r.usage_count > 0));
    assert!(first
        .items
        .windows(2)
        .all(|w| w[0].coverage_percentage >= w[1].coverage_percentage));
}

// ============================================================================
// Properties
// ============================================================================

fn arb_record() -> impl Strategy<Value = ApiRecord> {
    (
        "[a-zA-Z_]{1,8}",
        0u32..200,
        0u32..200,
        0u32..40,
        0u32..700,
        0i64..120,
    )
        .prop_map(|(name, full, covered, usage, clients, days)| {
            ApiRecord::builder(name)
                .lines(full, covered)
                .usage(usage, clients)
                .documentation("generated")
                .last_updated(ymd(2024, 1, 1) + chrono::Duration::days(days))
                .build()
        })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        0u32..=100,
        0u32..=100,
        prop::sample::select(UsageFilter::all().to_vec()),
        prop_oneof![Just(String::new()), "[a-z_]{1,3}"],
        prop::option::of((0i64..120, 0i64..120)),
    )
        .prop_map(|(a, b, usage, query, dates)| {
            let mut criteria = FilterCriteria::new()
                .with_coverage(a, b)
                .with_usage(usage)
                .with_search(query);
            if let Some((start, end)) = dates {
                let base = ymd(2024, 1, 1);
                criteria = criteria.with_date_range(
                    base + chrono::Duration::days(start),
                    base + chrono::Duration::days(end),
                );
            }
            criteria
        })
}

fn arb_field() -> impl Strategy<Value = SortField> {
    prop::sample::select(SortField::all().to_vec())
}

proptest! {
    #[test]
    fn prop_filter_is_idempotent(records in prop::collection::vec(arb_record(), 0..40), criteria in arb_criteria()) {
        let once = filter(&records, &criteria);
        let twice = filter(&once, &criteria);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_filter_preserves_relative_order(records in prop::collection::vec(arb_record(), 0..40), criteria in arb_criteria()) {
        // Tag each record with its input position to detect reordering.
        let tagged: Vec<ApiRecord> = records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| { r.name = format!("{i:04}"); r })
            .collect();
        let kept = filter(&tagged, &criteria);
        prop_assert!(kept.windows(2).all(|w| w[0].name < w[1].name));
    }

    #[test]
    fn prop_sort_is_stable(records in prop::collection::vec(arb_record(), 0..40), field in arb_field(), desc in any::<bool>()) {
        let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
        let tagged: Vec<(usize, ApiRecord)> = records.into_iter().enumerate().collect();
        let plain: Vec<ApiRecord> = tagged.iter().map(|(_, r)| r.clone()).collect();
        let sorted = sort(&plain, field, direction);

        // Recover each sorted element's original index, consuming duplicates in order.
        let mut used = vec![false; tagged.len()];
        let mut positions = Vec::with_capacity(sorted.len());
        for r in &sorted {
            let idx = tagged
                .iter()
                .position(|(i, t)| !used[*i] && t == r)
                .unwrap();
            used[idx] = true;
            positions.push(idx);
        }

        for w in sorted.windows(2).zip(positions.windows(2)) {
            let (pair, idx) = w;
            if field.compare(&pair[0], &pair[1]) == std::cmp::Ordering::Equal {
                prop_assert!(idx[0] < idx[1]);
            }
        }
    }

    #[test]
    fn prop_desc_reverses_asc_without_ties(usages in prop::collection::hash_set(0u32..1000, 0..30)) {
        let records: Vec<ApiRecord> = usages
            .into_iter()
            .map(|u| ApiRecord::builder(format!("api_{u}")).lines(10, 5).usage(u, 604).build())
            .collect();
        let asc = sort(&records, SortField::UsageCount, SortDirection::Asc);
        let mut desc = sort(&records, SortField::UsageCount, SortDirection::Desc);
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn prop_pages_reconstruct_sequence(len in 0usize..120, page_size in 0usize..25) {
        let items: Vec<usize> = (0..len).collect();
        let joined: Vec<usize> = pages(&items, page_size)
            .flat_map(|p| p.items.iter().copied())
            .collect();
        prop_assert_eq!(joined, items);
    }

    #[test]
    fn prop_coverage_percentage_in_bounds(record in arb_record()) {
        prop_assert!(record.coverage_percentage <= 100);
        prop_assert!(record.covered_lines <= record.full_size);
    }
}
