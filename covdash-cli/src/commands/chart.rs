//! Chart command - distributions and the coverage-vs-usage scatter.

use anyhow::Result;
use clap::{Args, ValueEnum};
use covdash_core::{coverage_distribution, scatter_points, usage_distribution};
use tracing::info;

use super::{emit, FilterArgs, Session};
use crate::output::ChartOutput;
use crate::Cli;

/// Chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Histogram of coverage percentages.
    Coverage,
    /// APIs per usage bucket.
    Usage,
    /// Coverage vs usage quadrants.
    Scatter,
}

/// Arguments for the chart command.
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Chart to draw.
    #[arg(value_enum, default_value = "coverage")]
    pub kind: ChartKind,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Runs the chart command.
pub async fn run(args: &ChartArgs, cli: &Cli) -> Result<()> {
    let session = Session::open(cli).await?;
    let criteria = args.filter.to_criteria(session.config.display.date_range);

    info!(kind = ?args.kind, "Drawing chart");
    let records = session.service.fetch_api_data(Some(criteria)).await?;

    let engine = &session.config.engine;
    let output = match args.kind {
        ChartKind::Coverage => ChartOutput::Coverage(coverage_distribution(&records)),
        ChartKind::Usage => ChartOutput::Usage(usage_distribution(&records, &engine.usage)),
        ChartKind::Scatter => ChartOutput::Scatter(scatter_points(&records, &engine.coverage)),
    };

    emit(cli, &output, || {
        let text = session.text(cli);
        match &output {
            ChartOutput::Coverage(buckets) => text.format_coverage_distribution(buckets),
            ChartOutput::Usage(counts) => text.format_usage_distribution(counts),
            ChartOutput::Scatter(points) => text.format_scatter(points),
        }
    })
}
