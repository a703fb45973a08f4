//! The immutable record store.
//!
//! Holds the session's dataset. Records are shared behind an `Arc` and never
//! mutated after construction, so the store can be cloned cheaply into
//! every request.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use covdash_core::{ApiRecord, CoreError, RecordSource, TrendPoint};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::ingest::{self, ApiCoverage, ApiUsage};
use crate::persistence::{load_json, load_json_opt};

/// File names inside a dataset directory.
pub const COVERAGE_FILE: &str = "coverage.json";
/// Usage rows file.
pub const USAGE_FILE: &str = "usage.json";
/// Optional trend series file.
pub const TREND_FILE: &str = "trend.json";

/// Immutable collection of API records in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<[ApiRecord]>,
    index: Arc<HashMap<String, usize>>,
    trend: Arc<[TrendPoint]>,
}

impl RecordStore {
    /// Creates a store from records.
    ///
    /// If two records share a name, the later one replaces the earlier one
    /// at the earlier one's position.
    pub fn new(records: impl IntoIterator<Item = ApiRecord>) -> Self {
        let mut unique: Vec<ApiRecord> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in records {
            if let Some(&pos) = index.get(&record.name) {
                debug!(api = %record.name, "Duplicate API record replaced");
                unique[pos] = record;
            } else {
                index.insert(record.name.clone(), unique.len());
                unique.push(record);
            }
        }

        Self {
            records: unique.into(),
            index: Arc::new(index),
            trend: Arc::from(Vec::new()),
        }
    }

    /// Attaches a trend series.
    #[must_use]
    pub fn with_trend(mut self, trend: Vec<TrendPoint>) -> Self {
        self.trend = trend.into();
        self
    }

    /// Builds a store by joining raw coverage and usage exports.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCount`] if a usage row cannot be parsed.
    pub fn from_raw(
        coverage: &ApiCoverage,
        usage: &[ApiUsage],
        last_updated: NaiveDate,
    ) -> Result<Self, StoreError> {
        Ok(Self::new(ingest::join(coverage, usage, last_updated)?))
    }

    /// Loads a dataset directory containing `coverage.json`, `usage.json`
    /// and optionally `trend.json`.
    ///
    /// A missing `usage.json` means no API is used.
    ///
    /// # Errors
    ///
    /// Returns an error if `coverage.json` is missing or any file is invalid.
    pub async fn load_from_dir(dir: &Path, last_updated: NaiveDate) -> Result<Self, StoreError> {
        let coverage: ApiCoverage = load_json(&dir.join(COVERAGE_FILE)).await?;
        let usage: Vec<ApiUsage> = load_json_opt(&dir.join(USAGE_FILE))
            .await?
            .unwrap_or_default();
        let trend: Vec<TrendPoint> = load_json_opt(&dir.join(TREND_FILE))
            .await?
            .unwrap_or_default();

        let store = Self::from_raw(&coverage, &usage, last_updated)?.with_trend(trend);
        info!(
            dir = %dir.display(),
            apis = store.len(),
            usage_rows = usage.len(),
            "Loaded dataset"
        );
        Ok(store)
    }

    /// Returns all records in insertion order.
    pub fn all(&self) -> &[ApiRecord] {
        &self.records
    }

    /// Returns a shared handle to the records.
    pub fn shared(&self) -> Arc<[ApiRecord]> {
        Arc::clone(&self.records)
    }

    /// Looks up a record by API name.
    pub fn get(&self, name: &str) -> Option<&ApiRecord> {
        self.index.get(name).map(|&pos| &self.records[pos])
    }

    /// Returns the trend series.
    pub fn trend(&self) -> &[TrendPoint] {
        &self.trend
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for RecordStore {
    fn describe(&self) -> String {
        format!("in-memory ({} APIs)", self.len())
    }

    async fn load_records(&self) -> Result<Arc<[ApiRecord]>, CoreError> {
        Ok(self.shared())
    }

    async fn load_trend(&self) -> Result<Vec<TrendPoint>, CoreError> {
        Ok(self.trend.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, usage: u32) -> ApiRecord {
        ApiRecord::builder(name).lines(10, 5).usage(usage, 604).build()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let store = RecordStore::new(vec![rec("c", 0), rec("a", 1), rec("b", 2)]);
        let names: Vec<&str> = store.all().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert!(store.all().is_empty());
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let store = RecordStore::new(vec![rec("a", 1), rec("b", 2), rec("a", 9)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].name, "a");
        assert_eq!(store.all()[0].usage_count, 9);
        assert_eq!(store.get("a").unwrap().usage_count, 9);
        assert_eq!(store.get("b").unwrap().usage_count, 2);
    }

    #[tokio::test]
    async fn test_record_source_shares_records() {
        let store = RecordStore::new(vec![rec("a", 1)]);
        let loaded = store.load_records().await.unwrap();
        assert!(Arc::ptr_eq(&loaded, &store.shared()));
        assert!(store.load_trend().await.unwrap().is_empty());
    }
}
