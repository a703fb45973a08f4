//! Configuration management.
//!
//! The config file is JSON. Every section and field has a default, so a
//! partial file (or none at all) is valid.

use std::path::{Path, PathBuf};

use covdash_core::{CoverageThresholds, DateRange, UsageThresholds};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::mock::DEFAULT_SEED;
use crate::persistence::{default_config_path, load_json_opt, save_json};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Engine thresholds.
    pub engine: EngineConfig,
    /// Presentation settings.
    pub display: DisplayConfig,
    /// Facade settings.
    pub service: ServiceConfig,
    /// Dataset location.
    pub data: DataConfig,
}

/// Thresholds shared by the filter engine and the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// High/medium usage-count thresholds.
    pub usage: UsageThresholds,
    /// Coverage tiers and the scatter popularity cut-off.
    pub coverage: CoverageThresholds,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayConfig {
    /// Rows per page of the `list` command.
    pub page_size: usize,
    /// Date range applied when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            date_range: None,
        }
    }
}

/// Simulated latency and debounce settings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// Latency of `fetch_api_data`.
    pub data_latency_ms: u64,
    /// Latency of `fetch_summary_stats`.
    pub summary_latency_ms: u64,
    /// Latency of `fetch_trend_data`.
    pub trend_latency_ms: u64,
    /// Quiet period of the search debouncer.
    pub debounce_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_latency_ms: 300,
            summary_latency_ms: 100,
            trend_latency_ms: 200,
            debounce_ms: 300,
        }
    }
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataConfig {
    /// Dataset directory. The mock dataset is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Seed of the mock dataset.
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path()).await
    }

    /// Loads configuration from a specific path; a missing file yields
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        let Some(config) = load_json_opt::<Config>(path).await? else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        };

        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path()).await
    }

    /// Saves configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] describing the first violation.
    pub fn validate(&self) -> Result<(), StoreError> {
        let usage = &self.engine.usage;
        if usage.medium == 0 || usage.medium > usage.high {
            return Err(StoreError::Config(format!(
                "usage thresholds must satisfy 0 < medium <= high (got medium={}, high={})",
                usage.medium, usage.high
            )));
        }

        let coverage = &self.engine.coverage;
        if coverage.medium > coverage.high || coverage.high > 100 {
            return Err(StoreError::Config(format!(
                "coverage tiers must satisfy medium <= high <= 100 (got medium={}, high={})",
                coverage.medium, coverage.high
            )));
        }

        if self.display.page_size == 0 {
            return Err(StoreError::Config("display.pageSize must be positive".to_string()));
        }

        Ok(())
    }
}
