//! Trend command - coverage over time.

use anyhow::Result;
use tracing::info;

use super::{emit, Session};
use crate::Cli;

/// Runs the trend command.
pub async fn run(cli: &Cli) -> Result<()> {
    let session = Session::open(cli).await?;

    let trend = session.service.fetch_trend_data().await?;
    info!(points = trend.len(), "Fetched trend");

    emit(cli, &trend, || session.text(cli).format_trend(&trend))
}
