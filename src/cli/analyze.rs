//! CLI entry-point for analysing local text without fetching.

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::config::Settings;

use super::{analyzer, render, AnalysisArgs};

/// Args for the `analyze` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Text file to analyse; stdin is read when omitted.
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let text = match &args.file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        None => io::read_to_string(io::stdin()).context("read stdin")?,
    };
    info!(chars = text.chars().count(), "analysing local text");

    let options = args.analysis.options();
    let report = analyzer(&settings, &options).analyze_text(&text, &options.normalized());
    render::print_article(&report, args.analysis.json)
}
