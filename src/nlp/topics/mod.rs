//! Category detection, capitalised key phrases and corpus-level LDA topics.

pub mod lda;

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ModelError;

use super::{
    tagger::is_function_word,
    tokenize::StopWords,
    vectorize::CountVectorizer,
};

use self::lda::LdaConfig;

static KEY_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("valid regex")
});

pub const TOPIC_MAX_FEATURES: usize = 50;

/// Coarse article category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Politics,
    Sports,
    Health,
    Science,
    Entertainment,
    #[default]
    General,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Business => "business",
            Self::Politics => "politics",
            Self::Sports => "sports",
            Self::Health => "health",
            Self::Science => "science",
            Self::Entertainment => "entertainment",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered category keyword lists; earlier entries win ties.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    entries: Vec<(Category, Vec<String>)>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        let table: [(Category, &[&str]); 7] = [
            (
                Category::Technology,
                &["tech", "software", "ai", "computer", "digital", "internet", "app"],
            ),
            (
                Category::Business,
                &["business", "economy", "market", "finance", "stock", "trade", "company"],
            ),
            (
                Category::Politics,
                &["politics", "government", "election", "president", "congress", "law", "policy"],
            ),
            (
                Category::Sports,
                &["sports", "game", "team", "player", "match", "score", "championship"],
            ),
            (
                Category::Health,
                &["health", "medical", "doctor", "disease", "treatment", "hospital", "covid"],
            ),
            (
                Category::Science,
                &["science", "research", "study", "discovery", "experiment", "scientist"],
            ),
            (
                Category::Entertainment,
                &["movie", "music", "celebrity", "film", "actor", "singer", "show"],
            ),
        ];
        Self::new(table.iter().map(|(category, words)| (*category, words.iter().copied())))
    }
}

impl CategoryTable {
    pub fn new<I, W, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, W)>,
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(category, words)| {
                    let words = words.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
                    (category, words)
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[(Category, Vec<String>)] {
        &self.entries
    }
}

/// A fitted topic: its highest-weighted terms and their mean weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub topic_id: usize,
    pub words: Vec<String>,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct TopicExtractor {
    table: CategoryTable,
    stop_words: StopWords,
    vectorizer: CountVectorizer,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new(CategoryTable::default(), StopWords::english().clone())
    }
}

impl TopicExtractor {
    pub fn new(table: CategoryTable, stop_words: StopWords) -> Self {
        let vectorizer =
            CountVectorizer::new(TOPIC_MAX_FEATURES, (1, 2)).with_stop_words(stop_words.clone());
        Self {
            table,
            stop_words,
            vectorizer,
        }
    }

    /// Category whose keywords occur most often as substrings of the lowercased text.
    pub fn categorize(&self, text: &str) -> Category {
        let lower = text.to_lowercase();
        let mut best = (Category::General, 0usize);
        for (category, keywords) in self.table.entries() {
            let score = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
            if score > best.1 {
                best = (*category, score);
            }
        }
        best.0
    }

    /// Most frequent runs of capitalised words, ties in first-seen order.
    ///
    /// Leading function words ("The", "In", ...) are stripped from each run and
    /// runs made only of stop words are dropped.
    pub fn key_phrases(&self, text: &str, top_n: usize) -> Vec<String> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for m in KEY_PHRASE.find_iter(text) {
            let phrase = strip_leading_function_words(m.as_str());
            if phrase.is_empty() || phrase.split_whitespace().all(|w| self.stop_words.contains(w)) {
                continue;
            }
            *counts.entry(phrase).or_insert(0) += 1;
        }
        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(top_n)
            .map(|(phrase, _)| phrase.to_string())
            .collect()
    }

    /// LDA topics over `documents`; fewer than two documents or any fitting
    /// failure yields an empty list.
    pub fn extract_topics<S: AsRef<str>>(
        &self,
        documents: &[S],
        n_topics: usize,
        words_per_topic: usize,
    ) -> Vec<Topic> {
        if documents.len() < 2 {
            debug!(documents = documents.len(), "too few documents for topic modelling");
            return Vec::new();
        }
        match self.fit_topics(documents, n_topics, words_per_topic) {
            Ok(topics) => topics,
            Err(err) => {
                warn!(error = %err, "topic extraction failed");
                Vec::new()
            }
        }
    }

    fn fit_topics<S: AsRef<str>>(
        &self,
        documents: &[S],
        n_topics: usize,
        words_per_topic: usize,
    ) -> Result<Vec<Topic>, ModelError> {
        let matrix = self.vectorizer.fit_transform(documents)?;
        let model = lda::fit(&matrix.counts, LdaConfig::new(n_topics))?;
        let take = words_per_topic.min(matrix.features.len());

        Ok(model
            .components
            .rows()
            .into_iter()
            .enumerate()
            .map(|(topic_id, weights)| {
                let mut order: Vec<usize> = (0..weights.len()).collect();
                order.sort_by(|a, b| weights[*b].total_cmp(&weights[*a]));
                order.truncate(take);
                let weight = if order.is_empty() {
                    0.0
                } else {
                    order.iter().map(|&i| weights[i]).sum::<f64>() / order.len() as f64
                };
                Topic {
                    topic_id,
                    words: order.iter().map(|&i| matrix.features[i].clone()).collect(),
                    weight,
                }
            })
            .collect())
    }
}

fn strip_leading_function_words(phrase: &str) -> &str {
    let mut rest = phrase;
    loop {
        let (first, tail) = match rest.split_once(char::is_whitespace) {
            Some((first, tail)) => (first, tail.trim_start()),
            None => (rest, ""),
        };
        if !is_function_word(first) {
            return rest;
        }
        if tail.is_empty() {
            return "";
        }
        rest = tail;
    }
}
