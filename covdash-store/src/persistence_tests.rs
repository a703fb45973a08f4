//! Persistence round-trip and edge case tests.
//!
//! Tests file I/O operations, dataset directories, and config round-trip.

use std::path::PathBuf;

use chrono::NaiveDate;
use covdash_core::{DateRange, RecordSource, TrendPoint, UsageThresholds};
use tempfile::TempDir;

use crate::config::Config;
use crate::error::StoreError;
use crate::ingest::{ApiCoverage, ApiUsage, CoverageEntry};
use crate::persistence::{ensure_dir, load_json, save_json};
use crate::record_store::{RecordStore, COVERAGE_FILE, TREND_FILE, USAGE_FILE};
use crate::source::{DatasetSource, JsonDirSource};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn write_dataset(dir: &std::path::Path) {
    let mut coverage = ApiCoverage::new();
    coverage.insert(
        "sws_scale".to_string(),
        CoverageEntry {
            full_size: 40,
            covered_lines: 10,
            apidoc: "int sws_scale(...)".to_string(),
        },
    );
    coverage.insert(
        "av_free".to_string(),
        CoverageEntry {
            full_size: 4,
            covered_lines: 4,
            apidoc: String::new(),
        },
    );
    let usage = vec![ApiUsage::new("sws_scale", 12, 604)];

    save_json(&dir.join(COVERAGE_FILE), &coverage).await.unwrap();
    save_json(&dir.join(USAGE_FILE), &usage).await.unwrap();
}

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("test.json");

    let data = serde_json::json!({"key": "value"});
    save_json(&nested_path, &data).await.unwrap();
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_load_nonexistent_file_is_not_found() {
    let file_path = PathBuf::from("/nonexistent/path/coverage.json");

    let result: Result<ApiCoverage, _> = load_json(&file_path).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_load_corrupt_file_is_serialization_error() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.json");
    tokio::fs::write(&file_path, "{not json").await.unwrap();

    let result: Result<Config, _> = load_json(&file_path).await;
    assert!(matches!(result, Err(StoreError::Serialization(_))));
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("data");

    ensure_dir(&dir_path).await.unwrap();
    ensure_dir(&dir_path).await.unwrap();

    assert!(dir_path.is_dir());
}

#[tokio::test]
async fn test_atomic_write() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("atomic.json");

    save_json(&file_path, &Config::default()).await.unwrap();

    assert!(!file_path.with_extension("json.tmp").exists());
    assert!(file_path.exists());
}

// ============================================================================
// Dataset Directory Tests
// ============================================================================

#[tokio::test]
async fn test_load_dataset_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(temp_dir.path()).await;

    let store = RecordStore::load_from_dir(temp_dir.path(), ymd(2024, 5, 1))
        .await
        .unwrap();

    assert_eq!(store.len(), 2);
    let names: Vec<&str> = store.all().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["sws_scale", "av_free"]);

    let scale = store.get("sws_scale").unwrap();
    assert_eq!(scale.coverage_percentage, 25);
    assert_eq!(scale.usage_count, 12);
    assert_eq!(scale.usage_percentage, 2);
    assert_eq!(scale.last_updated, ymd(2024, 5, 1));
    assert!(store.trend().is_empty());
}

#[tokio::test]
async fn test_dataset_keeps_coverage_file_order() {
    let temp_dir = TempDir::new().unwrap();
    tokio::fs::write(
        temp_dir.path().join(COVERAGE_FILE),
        r#"{
            "zeta_api": {"full_size": 10, "covered_lines": 5},
            "alpha_api": {"full_size": 20, "covered_lines": 20},
            "mid_api": {"full_size": 4, "covered_lines": 0}
        }"#,
    )
    .await
    .unwrap();

    let store = RecordStore::load_from_dir(temp_dir.path(), ymd(2024, 5, 1))
        .await
        .unwrap();
    let names: Vec<&str> = store.all().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["zeta_api", "alpha_api", "mid_api"]);

    let source = JsonDirSource::new(temp_dir.path(), ymd(2024, 5, 1));
    let loaded = source.load_records().await.unwrap();
    let names: Vec<&str> = loaded.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["zeta_api", "alpha_api", "mid_api"]);
}

#[tokio::test]
async fn test_missing_usage_file_means_unused() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(temp_dir.path()).await;
    tokio::fs::remove_file(temp_dir.path().join(USAGE_FILE))
        .await
        .unwrap();

    let store = RecordStore::load_from_dir(temp_dir.path(), ymd(2024, 5, 1))
        .await
        .unwrap();
    assert!(store.all().iter().all(|r| r.usage_count == 0));
}

#[tokio::test]
async fn test_missing_coverage_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = RecordStore::load_from_dir(temp_dir.path(), ymd(2024, 5, 1)).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_json_dir_source_reads_trend() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(temp_dir.path()).await;
    let trend = vec![TrendPoint::new(ymd(2024, 1, 1), 65, 150)];
    save_json(&temp_dir.path().join(TREND_FILE), &trend).await.unwrap();

    let source = JsonDirSource::new(temp_dir.path(), ymd(2024, 5, 1));
    assert_eq!(source.load_records().await.unwrap().len(), 2);
    assert_eq!(source.load_trend().await.unwrap(), trend);
}

#[tokio::test]
async fn test_json_dir_source_failure_maps_to_core_error() {
    let temp_dir = TempDir::new().unwrap();
    let source = DatasetSource::from(JsonDirSource::new(temp_dir.path(), ymd(2024, 5, 1)));

    let err = source.load_records().await.unwrap_err();
    assert!(err.to_string().contains(COVERAGE_FILE));
}

#[tokio::test]
async fn test_invalid_usage_count_in_file() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(temp_dir.path()).await;
    tokio::fs::write(
        temp_dir.path().join(USAGE_FILE),
        r#"[{"api_name": "sws_scale", "usage_count": "twelve", "total_clients": "604"}]"#,
    )
    .await
    .unwrap();

    let result = RecordStore::load_from_dir(temp_dir.path(), ymd(2024, 5, 1)).await;
    assert!(matches!(result, Err(StoreError::InvalidCount { .. })));
}

// ============================================================================
// Config Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_config_full_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.json");

    let mut config = Config::default();
    config.engine.usage = UsageThresholds { high: 40, medium: 15 };
    config.display.page_size = 25;
    config.display.date_range = Some(DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)));
    config.service.data_latency_ms = 0;
    config.data.data_dir = Some(PathBuf::from("/srv/covdash"));
    config.data.seed = 7;

    config.save_to(&file_path).await.unwrap();
    let loaded = Config::load_from(&file_path).await.unwrap();

    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_config_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let loaded = Config::load_from(&temp_dir.path().join("absent.json"))
        .await
        .unwrap();
    assert_eq!(loaded, Config::default());
}

#[tokio::test]
async fn test_config_minimal_and_unknown_fields() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.json");
    tokio::fs::write(&file_path, r#"{"display": {"pageSize": 10}, "theme": "dark"}"#)
        .await
        .unwrap();

    let loaded = Config::load_from(&file_path).await.unwrap();
    assert_eq!(loaded.display.page_size, 10);
    assert_eq!(loaded.service, Config::default().service);
}

#[tokio::test]
async fn test_config_invalid_thresholds_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.json");
    tokio::fs::write(&file_path, r#"{"engine": {"usage": {"high": 3, "medium": 9}}}"#)
        .await
        .unwrap();

    let result = Config::load_from(&file_path).await;
    assert!(matches!(result, Err(StoreError::Config(_))));
}
