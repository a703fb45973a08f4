//! List command - filtered, sorted, paginated API table.

use anyhow::Result;
use clap::Args;
use covdash_core::{paginate, SortDirection, SortField, SortState};
use tracing::{debug, info};

use super::{emit, FilterArgs, Session};
use crate::output::ListOutput;
use crate::Cli;

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Sort column (name, coverage, usage, size).
    #[arg(long, default_value = "name")]
    pub sort: SortField,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// 0-based page index; out-of-range values clamp to the nearest page.
    #[arg(long, short = 'p', default_value_t = 0, allow_negative_numbers = true)]
    pub page: i64,

    /// Rows per page (defaults to the configured page size).
    #[arg(long, short = 'n')]
    pub page_size: Option<usize>,
}

impl ListArgs {
    fn sort_state(&self) -> SortState {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortState::new(self.sort, direction)
    }
}

/// Runs the list command.
pub async fn run(args: &ListArgs, cli: &Cli) -> Result<()> {
    let session = Session::open(cli).await?;
    let criteria = args
        .filter
        .to_criteria(session.config.display.date_range);
    let sort = args.sort_state();
    let page_size = args.page_size.unwrap_or(session.config.display.page_size);

    info!(filters = criteria.active_filters().len(), sort = %sort.field, "Listing APIs");

    let records = session.service.fetch_api_data(Some(criteria.clone())).await?;
    let sorted = sort.apply(&records);
    let page = paginate(&sorted, page_size, args.page);

    debug!(
        requested = args.page,
        page = page.page_index,
        total_pages = page.total_pages,
        "Paginated"
    );

    let output = ListOutput {
        criteria: &criteria,
        active_filters: criteria.active_filters(),
        sort,
        page,
    };
    emit(cli, &output, || {
        session
            .text(cli)
            .format_page(&page, sort, &output.active_filters)
    })
}
