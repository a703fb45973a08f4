//! Summary command - summary cards for the whole dataset.

use anyhow::Result;
use covdash_core::RecordSource;
use futures::future::try_join;
use tracing::info;

use super::{emit, Session};
use crate::output::SummaryOutput;
use crate::Cli;

/// Runs the summary command.
pub async fn run(cli: &Cli) -> Result<()> {
    let session = Session::open(cli).await?;
    info!(source = %session.service.source().describe(), "Running summary");

    let (stats, records) = try_join(
        session.service.fetch_summary_stats(),
        session.service.fetch_api_data(None),
    )
    .await?;

    let engine = &session.config.engine;
    let output = SummaryOutput::new(&stats, &records, &engine.coverage, &engine.usage);
    emit(cli, &output, || {
        session.text(cli).format_summary(&stats, &records)
    })
}
