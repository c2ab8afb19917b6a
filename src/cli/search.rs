//! CLI entry-point for searching articles.

use anyhow::{ensure, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    analysis::Query,
    config::Settings,
    data::{Provider, SortBy},
};

use super::{analyzer, client, render, AnalysisArgs};

/// Args for the `search` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Search terms.
    pub query: String,
    /// Earliest publication date, passed to the provider unchanged (e.g. 2024-05-01).
    #[arg(long = "from")]
    pub from_date: Option<String>,
    #[arg(long, value_enum, default_value_t = SortBy::Relevancy)]
    pub sort_by: SortBy,
    /// Override NEWS_PROVIDER.
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    ensure!(!args.query.trim().is_empty(), "search query must not be empty");
    let client = client(&settings, args.provider)?;

    info!(query = %args.query, sort_by = ?args.sort_by, "searching articles");
    let result = client
        .search(&args.query, args.from_date.as_deref(), args.sort_by)
        .await;

    let options = args.analysis.options();
    let query = Query::Search {
        query: args.query,
        from_date: args.from_date,
        sort_by: args.sort_by,
    };
    let report = analyzer(&settings, &options).analyze_fetch(query, &result, &options);
    render::print_batch(&report, args.analysis.json)
}
