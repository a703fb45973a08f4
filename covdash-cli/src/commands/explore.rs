//! Explore command - debounced interactive search.
//!
//! Reads one search query per line from stdin. Bursts of lines collapse to
//! the last one, each settled query is fetched concurrently, and a response
//! is printed only if no newer query was issued meanwhile.

use std::pin::pin;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use covdash_core::{ApiRecord, FilterCriteria, SortDirection, SortField, SortState};
use covdash_fetch::{Debouncer, FetchError, Generation, RequestTracker};
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{FilterArgs, Session};
use crate::output::{JsonFormatter, SearchOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the explore command.
#[derive(Args, Debug)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Quiet period in milliseconds (defaults to the configured debounce).
    #[arg(long, value_name = "MS")]
    pub debounce: Option<u64>,

    /// Maximum rows printed per response.
    #[arg(long, short = 'l', default_value_t = 10)]
    pub limit: usize,

    /// Sort column of each response (name, coverage, usage, size).
    #[arg(long, default_value = "name")]
    pub sort: SortField,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

type Response = (Generation, String, Result<Vec<ApiRecord>, FetchError>);

/// Runs the explore command.
pub async fn run(args: &ExploreArgs, cli: &Cli) -> Result<()> {
    let session = Session::open(cli).await?;
    let base = args.filter.to_criteria(session.config.display.date_range);
    let quiet = args
        .debounce
        .map_or_else(|| session.debounce(), Duration::from_millis);
    let sort = SortState::new(
        args.sort,
        if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
    );

    info!(debounce_ms = quiet.as_millis(), "Exploring; one query per line");

    let (query_tx, debouncer) = Debouncer::channel(64, quiet);
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if query_tx.send(line).await.is_err() {
                break;
            }
        }
        Ok::<(), std::io::Error>(())
    });

    let printer = Printer {
        cli,
        text: session.text(cli),
        json: JsonFormatter::new(false),
        limit: args.limit,
        sort,
    };
    let tracker = RequestTracker::new();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Response>();
    let mut queries = pin!(debouncer.into_stream());
    let mut input_done = false;

    while !input_done {
        tokio::select! {
            query = queries.next() => match query {
                Some(query) => {
                    let generation = tracker.begin();
                    debug!(generation = generation.get(), query = %query, "Issuing search");

                    let criteria = FilterCriteria {
                        search_query: query.clone(),
                        ..base.clone()
                    };
                    let service = session.service.clone();
                    let tx = result_tx.clone();
                    tokio::spawn(async move {
                        let result = service.fetch_api_data(Some(criteria)).await;
                        let _ = tx.send((generation, query, result));
                    });
                }
                None => input_done = true,
            },
            Some(response) = result_rx.recv() => printer.handle(&tracker, response)?,
        }
    }

    drop(result_tx);
    while let Some(response) = result_rx.recv().await {
        printer.handle(&tracker, response)?;
    }

    reader.await??;
    Ok(())
}

struct Printer<'a> {
    cli: &'a Cli,
    text: TextFormatter,
    json: JsonFormatter,
    limit: usize,
    sort: SortState,
}

impl Printer<'_> {
    fn handle(&self, tracker: &RequestTracker, response: Response) -> Result<()> {
        let (generation, query, result) = response;
        let Some(result) = tracker.accept(generation, result) else {
            return Ok(());
        };

        let records = match result {
            Ok(records) => self.sort.apply(&records),
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed");
                if self.cli.format == OutputFormat::Text {
                    eprintln!("{}", self.text.format_error(&query, &e.to_string()));
                }
                return Ok(());
            }
        };

        match self.cli.format {
            OutputFormat::Text => {
                println!("{}", self.text.format_search_result(&query, &records, self.limit));
            }
            OutputFormat::Json => {
                let output = SearchOutput {
                    query: &query,
                    generation: generation.get(),
                    total: records.len(),
                    records: &records[..records.len().min(self.limit)],
                };
                println!("{}", self.json.format(&output)?);
            }
        }
        Ok(())
    }
}
