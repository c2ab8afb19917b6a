//! CLI entry-point for dictionary lookups.

use anyhow::{ensure, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{analysis::Analyzer, config::Settings};

use super::render;

/// Args for the `define` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Word or collocation to look up.
    pub word: String,
    /// Print the entry as JSON.
    #[arg(long)]
    pub json: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    ensure!(!args.word.trim().is_empty(), "word must not be empty");
    let entry = Analyzer::from_settings(&settings).lexical().entry(args.word.trim());
    render::print_definition(&entry, args.json)
}
