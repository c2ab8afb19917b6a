//! Fetch news from GNews or NewsAPI and analyse it: extractive summaries,
//! keywords, named entities, lexical relations, categories and LDA topics.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;

pub use analysis::{AnalysisOptions, Analyzer, ArticleReport, BatchReport};
pub use config::Settings;
pub use data::{Article, FetchResult, NewsClient, Provider};
pub use error::{FetchError, LexiconError, ModelError};
