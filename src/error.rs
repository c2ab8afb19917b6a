//! Typed failure surfaces for the adapter, the ranking models and the lexicon loader.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while talking to a news provider.
///
/// These never leave the adapter: [`crate::data::NewsClient`] folds them into
/// [`crate::data::FetchResult::Error`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("missing API key: set {env_var} to query {provider}")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP Error {code}: {body}")]
    Status { code: u16, body: String },
    #[error("malformed provider payload: {0}")]
    Decode(String),
}

/// Numerical or structural failures of a ranking or topic model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("empty vocabulary; documents contain only stop words")]
    EmptyVocabulary,
    #[error("degenerate model input: {0}")]
    Degenerate(String),
    #[error("no convergence after {iterations} iterations")]
    NoConvergence { iterations: usize },
}

/// Failures while loading a WordNet-format lexical database.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}:{line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },
}

impl LexiconError {
    pub(crate) fn parse(file: &str, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}
