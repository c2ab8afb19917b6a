//! CLI entry-point for fetching and analysing top headlines.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{analysis::Query, config::Settings, data::Provider};

use super::{analyzer, client, render, AnalysisArgs};

/// Args for the `headlines` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Two-letter country code (defaults to DEFAULT_COUNTRY).
    #[arg(long)]
    pub country: Option<String>,
    /// Provider category such as technology or sports; "general" means unfiltered.
    #[arg(long)]
    pub category: Option<String>,
    /// Articles to request (clamped to the provider maximum).
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Override NEWS_PROVIDER.
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = client(&settings, args.provider)?;
    let country = args
        .country
        .unwrap_or_else(|| settings.default_country.clone());
    let page_size = args.page_size.unwrap_or(settings.default_page_size);

    info!(%country, category = ?args.category, page_size, "fetching headlines");
    let result = client
        .fetch_top_headlines(&country, args.category.as_deref(), page_size)
        .await;

    let options = args.analysis.options();
    let query = Query::Headlines {
        country,
        requested_category: args.category,
        page_size,
    };
    let report = analyzer(&settings, &options).analyze_fetch(query, &result, &options);
    render::print_batch(&report, args.analysis.json)
}
