//! Command-line interface wiring for news-lens.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::{
    analysis::{AnalysisOptions, Analyzer},
    config::Settings,
    data::{NewsClient, Provider},
    nlp::SummaryMethod,
};

pub mod analyze;
pub mod define;
pub mod headlines;
pub mod render;
pub mod search;
pub mod serve;
pub mod sources;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Fetch news and analyse it: summaries, keywords, entities, topics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Headlines(args) => headlines::run(args, settings).await,
            Commands::Search(args) => search::run(args, settings).await,
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Define(args) => define::run(args, settings).await,
            Commands::Sources(args) => sources::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch and analyse top headlines.
    Headlines(headlines::Args),
    /// Search articles and analyse the results.
    Search(search::Args),
    /// Analyse local text from a file or stdin.
    Analyze(analyze::Args),
    /// Print definitions, synonyms and antonyms for a word.
    Define(define::Args),
    /// List the sources the provider exposes.
    Sources(sources::Args),
    /// Serve the JSON API.
    Serve(serve::Args),
}

/// Analysis flags shared by the fetching and analysing commands.
#[derive(Debug, Clone, ClapArgs)]
pub struct AnalysisArgs {
    /// Sentence ranking algorithm for summaries.
    #[arg(long, value_enum, default_value_t = SummaryMethod::TextRank)]
    pub summary_method: SummaryMethod,
    /// Sentences per summary.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=5))]
    pub summary_count: u8,
    /// Keywords per article.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(5..=15))]
    pub keyword_count: u8,
    /// Articles to analyse from the fetched batch.
    #[arg(long, default_value_t = 3)]
    pub max_articles: usize,
    /// Skip synonym and antonym lookups.
    #[arg(long)]
    pub no_lexical: bool,
    /// Skip categories, key phrases and topic modelling.
    #[arg(long)]
    pub no_topics: bool,
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl AnalysisArgs {
    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            summary_method: self.summary_method,
            summary_count: usize::from(self.summary_count),
            keyword_count: usize::from(self.keyword_count),
            max_articles: self.max_articles,
            lexical: !self.no_lexical,
            topics: !self.no_topics,
            ..AnalysisOptions::default()
        }
    }
}

/// Client for `provider`, falling back to the configured default.
pub(crate) fn client(settings: &Settings, provider: Option<Provider>) -> Result<NewsClient> {
    let provider = provider.unwrap_or(settings.provider);
    NewsClient::new(settings, provider)
        .with_context(|| format!("build HTTP client for {}", provider.name()))
}

/// Analyzer for `options`; the lexicon is only loaded when lookups are wanted.
pub(crate) fn analyzer(settings: &Settings, options: &AnalysisOptions) -> Analyzer {
    if options.lexical {
        Analyzer::from_settings(settings)
    } else {
        Analyzer::default()
    }
}
