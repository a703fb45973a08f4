//! Record sources backed by the store.
//!
//! [`JsonDirSource`] re-reads a dataset directory on every request, so a
//! long-running `explore` session picks up a refreshed export.
//! [`DatasetSource`] picks between it and an in-memory [`RecordStore`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use covdash_core::{ApiRecord, CoreError, RecordSource, TrendPoint};
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::load_json_opt;
use crate::record_store::{RecordStore, TREND_FILE};

// ============================================================================
// JSON Directory Source
// ============================================================================

/// Loads records from `coverage.json` and `usage.json` in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
    last_updated: NaiveDate,
}

impl JsonDirSource {
    /// Creates a source for `dir`; joined records are dated `last_updated`.
    pub fn new(dir: impl Into<PathBuf>, last_updated: NaiveDate) -> Self {
        Self {
            dir: dir.into(),
            last_updated,
        }
    }

    /// The dataset directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads the directory into a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the coverage export is missing or any file is
    /// invalid.
    pub async fn load(&self) -> Result<RecordStore, StoreError> {
        RecordStore::load_from_dir(&self.dir, self.last_updated).await
    }
}

impl RecordSource for JsonDirSource {
    fn describe(&self) -> String {
        format!("json ({})", self.dir.display())
    }

    async fn load_records(&self) -> Result<Arc<[ApiRecord]>, CoreError> {
        debug!(dir = %self.dir.display(), "Reading dataset directory");
        Ok(self.load().await?.shared())
    }

    async fn load_trend(&self) -> Result<Vec<TrendPoint>, CoreError> {
        let trend: Option<Vec<TrendPoint>> = load_json_opt(&self.dir.join(TREND_FILE)).await?;
        Ok(trend.unwrap_or_default())
    }
}

// ============================================================================
// Dataset Source
// ============================================================================

/// The dataset a session runs against.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Records held in memory, e.g. the mock dataset.
    Memory(RecordStore),
    /// Records read from a dataset directory.
    Directory(JsonDirSource),
}

impl From<RecordStore> for DatasetSource {
    fn from(store: RecordStore) -> Self {
        DatasetSource::Memory(store)
    }
}

impl From<JsonDirSource> for DatasetSource {
    fn from(source: JsonDirSource) -> Self {
        DatasetSource::Directory(source)
    }
}

impl RecordSource for DatasetSource {
    fn describe(&self) -> String {
        match self {
            DatasetSource::Memory(store) => store.describe(),
            DatasetSource::Directory(source) => source.describe(),
        }
    }

    async fn load_records(&self) -> Result<Arc<[ApiRecord]>, CoreError> {
        match self {
            DatasetSource::Memory(store) => store.load_records().await,
            DatasetSource::Directory(source) => source.load_records().await,
        }
    }

    async fn load_trend(&self) -> Result<Vec<TrendPoint>, CoreError> {
        match self {
            DatasetSource::Memory(store) => store.load_trend().await,
            DatasetSource::Directory(source) => source.load_trend().await,
        }
    }
}
