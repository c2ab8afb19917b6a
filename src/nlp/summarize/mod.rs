//! Extractive summarisation over ranked sentences.
//!
//! Each ranking strategy returns `Result<Vec<f64>, ModelError>`; a failed
//! ranking is answered with [`truncate_fallback`], which cannot fail.

mod lexrank;
mod lsa;
mod textrank;

use clap::ValueEnum;
use rust_stemmers::Stemmer;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ModelError;

use super::tokenize::{content_words, english_stemmer, split_sentences, StopWords};

/// Texts shorter than this many characters are returned unchanged.
pub const MIN_SUMMARY_CHARS: usize = 100;

/// Sentence ranking algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    #[default]
    #[value(name = "textrank")]
    TextRank,
    #[value(name = "lsa")]
    Lsa,
    #[value(name = "lexrank")]
    LexRank,
}

impl SummaryMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextRank => "textrank",
            Self::Lsa => "lsa",
            Self::LexRank => "lexrank",
        }
    }
}

/// Stemming, stop-word aware sentence extractor.
pub struct Summarizer {
    stemmer: Stemmer,
    stop_words: StopWords,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(english_stemmer(), StopWords::english().clone())
    }
}

impl Summarizer {
    pub fn new(stemmer: Stemmer, stop_words: StopWords) -> Self {
        Self {
            stemmer,
            stop_words,
        }
    }

    /// Reduce `text` to its `sentence_count` best sentences, joined in document order.
    pub fn summarize(&self, text: &str, sentence_count: usize, method: SummaryMethod) -> String {
        if text.is_empty() || text.chars().count() < MIN_SUMMARY_CHARS {
            return text.to_string();
        }
        match self.select(text, sentence_count, method) {
            Ok(sentences) => sentences.join(" "),
            Err(err) => {
                warn!(method = method.as_str(), error = %err, "ranking failed; truncating instead");
                truncate_fallback(text, sentence_count)
            }
        }
    }

    /// TextRank-selected sentences as a list, in document order.
    pub fn extract_key_sentences(&self, text: &str, count: usize) -> Vec<String> {
        match self.select(text, count, SummaryMethod::TextRank) {
            Ok(sentences) => sentences,
            Err(err) => {
                warn!(error = %err, "key sentence ranking failed; using leading segments");
                text.split('.').take(count).map(str::to_string).collect()
            }
        }
    }

    /// Rank sentences with `method` and keep the best `count`.
    pub fn select(
        &self,
        text: &str,
        count: usize,
        method: SummaryMethod,
    ) -> Result<Vec<String>, ModelError> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Err(ModelError::Degenerate("no sentences".into()));
        }
        let words: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| content_words(s, &self.stop_words, &self.stemmer))
            .collect();
        if words.iter().all(Vec::is_empty) {
            return Err(ModelError::EmptyVocabulary);
        }

        let scores = match method {
            SummaryMethod::TextRank => textrank::scores(&words)?,
            SummaryMethod::LexRank => lexrank::scores(&words)?,
            SummaryMethod::Lsa => lsa::scores(&words)?,
        };
        if scores.len() != sentences.len() || scores.iter().any(|s| !s.is_finite()) {
            return Err(ModelError::Degenerate("non-finite sentence scores".into()));
        }
        debug!(method = method.as_str(), sentences = sentences.len(), "ranked sentences");

        let mut order: Vec<usize> = (0..sentences.len()).collect();
        order.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]));
        let mut best: Vec<usize> = order.into_iter().take(count).collect();
        best.sort_unstable();
        Ok(best.into_iter().map(|idx| sentences[idx].clone()).collect())
    }
}

/// First `sentence_count` period-delimited segments, re-joined with `". "`.
pub fn truncate_fallback(text: &str, sentence_count: usize) -> String {
    let segments: Vec<&str> = text.split('.').take(sentence_count).collect();
    format!("{}.", segments.join(". "))
}

/// Power iteration `p <- Mᵀp` from the uniform vector until the L2 change drops below `epsilon`.
pub(crate) fn power_method(
    matrix: &ndarray::Array2<f64>,
    epsilon: f64,
    max_iterations: usize,
) -> Result<Vec<f64>, ModelError> {
    let n = matrix.nrows();
    let transposed = matrix.t();
    let mut p = ndarray::Array1::<f64>::from_elem(n, 1.0 / n as f64);
    for _ in 0..max_iterations {
        let next = transposed.dot(&p);
        let delta = (&next - &p).mapv(|v| v * v).sum().sqrt();
        if !delta.is_finite() {
            return Err(ModelError::Degenerate("power iteration diverged".into()));
        }
        p = next;
        if delta <= epsilon {
            return Ok(p.to_vec());
        }
    }
    Err(ModelError::NoConvergence {
        iterations: max_iterations,
    })
}
