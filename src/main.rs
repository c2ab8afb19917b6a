//! Entry point wiring CLI dispatch to the fetch and analysis pipeline.

use anyhow::Result;
use news_lens::{cli::Cli, logging, Settings};
use tracing::{info, instrument};

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(?cli, provider = settings.provider.name(), "starting command");
    cli.dispatch(settings).await
}
