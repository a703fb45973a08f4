//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use covdash_store::{default_config_dir, default_data_dir, Config};
use tracing::info;

use super::load_config;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a configuration file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init { force } => init_config(*force, cli).await,
    }
}

fn config_path(cli: &Cli) -> std::path::PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_path)
}

async fn show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli).await?;

    match cli.format {
        OutputFormat::Text => {
            let engine = &config.engine;
            println!("CovDash Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!(
                "Usage thresholds:  high >= {}, medium >= {}",
                engine.usage.high, engine.usage.medium
            );
            println!(
                "Coverage tiers:    high >= {}%, medium >= {}%",
                engine.coverage.high, engine.coverage.medium
            );
            println!(
                "Popular usage:     >= {}% of clients",
                engine.coverage.popular_usage_percent
            );
            println!("Page size:         {}", config.display.page_size);
            match config.display.date_range {
                Some(range) => println!("Date range:        {} to {}", range.start, range.end),
                None => println!("Date range:        unbounded"),
            }
            println!(
                "Latency (ms):      data {}, summary {}, trend {}",
                config.service.data_latency_ms,
                config.service.summary_latency_ms,
                config.service.trend_latency_ms
            );
            println!("Debounce (ms):     {}", config.service.debounce_ms);
            match &config.data.data_dir {
                Some(dir) => println!("Dataset:           {}", dir.display()),
                None => println!("Dataset:           mock (seed {})", config.data.seed),
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let config_file = config_path(cli);
    let data_dir = default_data_dir();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Config file:   {}", config_file.display());
            println!("Data dir:      {}", data_dir.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "configDir": config_dir.display().to_string(),
                "configFile": config_file.display().to_string(),
                "dataDir": data_dir.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    if !force && tokio::fs::try_exists(&path).await.unwrap_or(false) {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path).await?;
    info!(path = %path.display(), "Config initialized");
    println!("Wrote default configuration to {}", path.display());

    Ok(())
}
