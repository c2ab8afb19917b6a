//! Frequency-ranked important words and entity extraction.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    tagger::{Entity, GazetteerNer, Ner, RuleTagger, Tagger},
    tokenize::StopWords,
};

/// A keyword with its raw count and share of the filtered token stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportantWord {
    pub word: String,
    pub frequency: usize,
    pub importance_score: f64,
}

/// Tagger, recogniser and stop words shared by per-article keyword extraction.
#[derive(Clone)]
pub struct TextProcessor {
    tagger: Arc<dyn Tagger>,
    ner: Arc<dyn Ner>,
    stop_words: StopWords,
}

impl std::fmt::Debug for TextProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextProcessor")
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(
            Arc::new(RuleTagger),
            Arc::new(GazetteerNer),
            StopWords::english().clone(),
        )
    }
}

impl TextProcessor {
    pub fn new(tagger: Arc<dyn Tagger>, ner: Arc<dyn Ner>, stop_words: StopWords) -> Self {
        Self {
            tagger,
            ner,
            stop_words,
        }
    }

    /// Top `top_n` nouns, verbs and proper nouns plus every entity in document order.
    ///
    /// Tokens whose lowercase form is a stop word or whose length is two
    /// characters or fewer are ignored. Ties in frequency keep first-seen order.
    pub fn extract_important_words(
        &self,
        text: &str,
        top_n: usize,
    ) -> (Vec<ImportantWord>, Vec<Entity>) {
        let tokens = self.tagger.tag(text);
        let entities = self.ner.extract(text, &tokens);

        let mut counts: IndexMap<String, usize> = IndexMap::new();
        let mut total = 0usize;
        for token in &tokens {
            if !token.pos.is_keyword_class() || token.text.chars().count() <= 2 {
                continue;
            }
            let lower = token.text.to_lowercase();
            if self.stop_words.contains(&lower) {
                continue;
            }
            *counts.entry(lower).or_insert(0) += 1;
            total += 1;
        }
        if total == 0 {
            debug!(entities = entities.len(), "no keyword candidates");
            return (Vec::new(), entities);
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let words = ranked
            .into_iter()
            .take(top_n)
            .map(|(word, frequency)| ImportantWord {
                word,
                frequency,
                importance_score: frequency as f64 / total as f64,
            })
            .collect();
        (words, entities)
    }
}
