//! CLI command implementations.

pub mod chart;
pub mod config;
pub mod explore;
pub mod list;
pub mod summary;
pub mod trend;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use covdash_core::{DateRange, FilterCriteria, QuickFilter, UsageFilter};
use covdash_fetch::{DataService, ServiceLatency};
use covdash_store::{mock_dataset, Config, DatasetSource, JsonDirSource};
use tracing::{debug, info};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

// ============================================================================
// Session
// ============================================================================

/// Everything a command needs: the effective config and the facade.
pub struct Session {
    /// Effective configuration.
    pub config: Config,
    /// Data access facade over the selected dataset.
    pub service: DataService<DatasetSource>,
}

impl Session {
    /// Loads the config and selects the dataset from config and flags.
    pub async fn open(cli: &Cli) -> Result<Self> {
        let config = load_config(cli).await?;
        let today = chrono::Local::now().date_naive();

        let data_dir = cli.data_dir.clone().or_else(|| config.data.data_dir.clone());
        let source: DatasetSource = match data_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Using dataset directory");
                JsonDirSource::new(dir, today).into()
            }
            None => {
                let seed = cli.seed.unwrap_or(config.data.seed);
                debug!(seed, "Using mock dataset");
                mock_dataset(seed, today).into()
            }
        };

        let latency = if cli.no_latency {
            ServiceLatency::none()
        } else {
            ServiceLatency::from(&config.service)
        };

        let service = DataService::builder(source)
            .latency(latency)
            .usage_thresholds(config.engine.usage)
            .build();

        Ok(Self { config, service })
    }

    /// Quiet period for debounced input.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.service.debounce_ms)
    }

    /// Text formatter using the configured coverage tiers.
    pub fn text(&self, cli: &Cli) -> TextFormatter {
        TextFormatter::new(!cli.no_color)
            .with_coverage_thresholds(self.config.engine.coverage)
            .with_usage_thresholds(self.config.engine.usage)
    }
}

/// Loads the configuration from `--config` or the default path.
pub async fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    Config::load_from(&path)
        .await
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Prints a value as JSON or through a text rendering.
pub fn emit<T: serde::Serialize>(
    cli: &Cli,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match cli.format {
        OutputFormat::Text => println!("{}", text()),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(value)?),
    }
    Ok(())
}

// ============================================================================
// Filter Arguments
// ============================================================================

/// Filter flags shared by `list`, `chart`, and `explore`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Start from a quick-filter preset
    /// (high-coverage-used, low-coverage-used, unused).
    #[arg(long)]
    pub preset: Option<QuickFilter>,

    /// Minimum coverage percentage.
    #[arg(long, value_name = "PERCENT")]
    pub min_coverage: Option<u32>,

    /// Maximum coverage percentage.
    #[arg(long, value_name = "PERCENT")]
    pub max_coverage: Option<u32>,

    /// Usage filter (all, used, unused, high, medium, low).
    #[arg(long, short = 'u')]
    pub usage: Option<UsageFilter>,

    /// Case-insensitive search over names and documentation.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Earliest last-updated date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest last-updated date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    /// Builds criteria: preset first, then explicit flags on top.
    ///
    /// Without `--from`/`--to`, `default_dates` applies.
    pub fn to_criteria(&self, default_dates: Option<DateRange>) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        if let Some(preset) = self.preset {
            criteria.apply_preset(preset);
        }

        if self.min_coverage.is_some() || self.max_coverage.is_some() {
            let min = self.min_coverage.unwrap_or(criteria.coverage_range.min);
            let max = self.max_coverage.unwrap_or(criteria.coverage_range.max);
            criteria = criteria.with_coverage(min, max);
        }
        if let Some(usage) = self.usage {
            criteria = criteria.with_usage(usage);
        }
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.clone());
        }

        criteria.date_range = match (self.from, self.to) {
            (None, None) => default_dates,
            (from, to) => Some(DateRange::new(
                from.unwrap_or(NaiveDate::MIN),
                to.unwrap_or(NaiveDate::MAX),
            )),
        };

        criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covdash_core::CoverageRange;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_flags_is_default_criteria() {
        assert_eq!(FilterArgs::default().to_criteria(None), FilterCriteria::default());
    }

    #[test]
    fn test_flags_override_preset() {
        let args = FilterArgs {
            preset: Some(QuickFilter::HighCoverageUsed),
            max_coverage: Some(95),
            ..FilterArgs::default()
        };
        let criteria = args.to_criteria(None);
        assert_eq!(criteria.coverage_range, CoverageRange::new(80, 95));
        assert_eq!(criteria.usage_filter, UsageFilter::Used);
    }

    #[test]
    fn test_open_ended_dates() {
        let args = FilterArgs {
            from: Some(ymd(2024, 3, 1)),
            ..FilterArgs::default()
        };
        let range = args.to_criteria(None).date_range.unwrap();
        assert_eq!(range.start, ymd(2024, 3, 1));
        assert_eq!(range.end, NaiveDate::MAX);
    }

    #[test]
    fn test_configured_dates_apply_without_flags() {
        let configured = DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31));
        assert_eq!(
            FilterArgs::default().to_criteria(Some(configured)).date_range,
            Some(configured)
        );

        let args = FilterArgs {
            to: Some(ymd(2024, 6, 1)),
            ..FilterArgs::default()
        };
        assert_eq!(
            args.to_criteria(Some(configured)).date_range.unwrap().start,
            NaiveDate::MIN
        );
    }
}
