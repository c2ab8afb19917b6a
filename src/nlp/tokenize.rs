//! Sentence and word segmentation, stop words and stemming.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

static VECTOR_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

static ENGLISH: Lazy<StopWords> = Lazy::new(|| {
    StopWords::from_words(
        stop_words::get(stop_words::LANGUAGE::English)
            .iter()
            .map(|w| w.to_string()),
    )
});

/// Split text into trimmed, non-empty sentences on Unicode sentence boundaries.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased word tokens of a sentence, punctuation excluded.
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

/// Lowercased tokens of two or more word characters, as used by the vectorizers.
pub fn vector_tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    VECTOR_TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Case-insensitive stop-word set.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Shared English list.
    pub fn english() -> &'static StopWords {
        &ENGLISH
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lowercase, drop stop words, then stem; the content-word view of a sentence.
pub fn content_words(sentence: &str, stop_words: &StopWords, stemmer: &Stemmer) -> Vec<String> {
    words(sentence)
        .into_iter()
        .filter(|w| !stop_words.contains(w))
        .map(|w| stemmer.stem(&w).into_owned())
        .collect()
}

pub fn english_stemmer() -> Stemmer {
    Stemmer::create(Algorithm::English)
}
