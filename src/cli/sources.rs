//! CLI entry-point listing provider sources.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, data::Provider};

use super::client;

/// Args for the `sources` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Override NEWS_PROVIDER.
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = client(&settings, args.provider)?;
    for source in client.sources() {
        println!("{:<10} {:<10} {}", source.id, source.name, source.description);
    }
    Ok(())
}
