// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `CovDash` CLI - API coverage and usage analytics from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Summary cards for the mock dataset
//! covdash
//!
//! # Used APIs with at least 80% coverage, by usage, busiest first
//! covdash list --preset high-coverage-used --sort usage --desc
//!
//! # Second page of 10
//! covdash list --page 1 --page-size 10
//!
//! # Coverage histogram of a real export
//! covdash --data-dir ./export chart coverage
//!
//! # JSON output
//! covdash --format json --pretty summary
//!
//! # Interactive search, one query per line
//! covdash explore
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use covdash_fetch::FetchError;
use covdash_store::StoreError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{chart, config, explore, list, summary, trend};

// ============================================================================
// CLI Definition
// ============================================================================

/// `CovDash` CLI - API coverage and usage analytics.
#[derive(Parser)]
#[command(name = "covdash")]
#[command(about = "API coverage and usage analytics CLI")]
#[command(long_about = r#"
CovDash joins test-coverage exports with client usage counts and answers
"which APIs are widely used but poorly tested?".

Without --data-dir, a seeded demonstration dataset is used. A dataset
directory holds coverage.json, usage.json, and optionally trend.json.

Examples:
  covdash                                   # Summary cards
  covdash list --usage high --sort coverage # Busy APIs, least covered first
  covdash list --search frame --page 1      # Second page of a search
  covdash chart scatter                     # Coverage vs usage quadrants
  covdash --format json trend               # Trend series as JSON
"#)]
#[command(version)]
#[command(author = "CovDash Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'summary' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset directory with coverage.json and usage.json.
    #[arg(long, short = 'd', global = true)]
    pub data_dir: Option<PathBuf>,

    /// Seed of the demonstration dataset.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Skip the simulated service latency.
    #[arg(long, global = true)]
    pub no_latency: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show summary cards (default if no command specified).
    #[command(visible_alias = "s")]
    Summary,

    /// List APIs matching filters, sorted and paginated.
    #[command(visible_alias = "ls")]
    List(list::ListArgs),

    /// Show a chart of the filtered APIs.
    #[command(visible_alias = "c")]
    Chart(chart::ChartArgs),

    /// Show the coverage trend.
    #[command(visible_alias = "t")]
    Trend,

    /// Search interactively, reading one query per line from stdin.
    #[command(visible_alias = "x")]
    Explore(explore::ExploreArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The dataset could not be loaded.
    DataSource = 2,
    /// The dataset or configuration is invalid.
    InvalidData = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    ///
    /// Walks the whole cause chain, so errors wrapped in context still map.
    fn for_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(err) = cause.downcast_ref::<FetchError>() {
                return match err {
                    FetchError::Source(_) => ExitCode::DataSource,
                    FetchError::InvalidData(_) | FetchError::Core(_) => ExitCode::InvalidData,
                };
            }
            if let Some(err) = cause.downcast_ref::<StoreError>() {
                return match err {
                    StoreError::NotFound(_) | StoreError::Io(_) => ExitCode::DataSource,
                    StoreError::InvalidCount { .. }
                    | StoreError::Serialization(_)
                    | StoreError::Config(_) => ExitCode::InvalidData,
                };
            }
        }
        ExitCode::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("covdash=debug,covdash_core=debug,covdash_store=debug,covdash_fetch=debug,info")
    } else {
        EnvFilter::new("covdash=warn,covdash_store=warn,covdash_fetch=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Summary) | None => summary::run(&cli).await,
        Some(Commands::List(args)) => list::run(args, &cli).await,
        Some(Commands::Chart(args)) => chart::run(args, &cli).await,
        Some(Commands::Trend) => trend::run(&cli).await,
        Some(Commands::Explore(args)) => explore::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn code(error: &anyhow::Error) -> i32 {
        ExitCode::for_error(error) as i32
    }

    #[test]
    fn test_exit_code_for_fetch_errors() {
        let source = anyhow::Error::from(FetchError::Source("offline".to_string()));
        assert_eq!(code(&source), ExitCode::DataSource as i32);

        let invalid = anyhow::Error::from(FetchError::InvalidData("bad row".to_string()));
        assert_eq!(code(&invalid), ExitCode::InvalidData as i32);
    }

    #[test]
    fn test_exit_code_sees_through_context() {
        let config: Result<()> = Err(StoreError::Config("usage.medium must be > 0".to_string()))
            .context("Failed to load config from config.json");
        assert_eq!(code(&config.unwrap_err()), ExitCode::InvalidData as i32);

        let missing: Result<()> =
            Err(StoreError::NotFound(PathBuf::from("coverage.json"))).context("Loading dataset");
        assert_eq!(code(&missing.unwrap_err()), ExitCode::DataSource as i32);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        assert_eq!(code(&anyhow::anyhow!("boom")), ExitCode::Error as i32);
    }
}
