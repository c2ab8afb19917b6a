//! Bag-of-n-grams vectorisation and TF-IDF weighting.

use std::collections::{BTreeMap, HashMap};

use ndarray::Array2;
use tracing::warn;

use crate::error::ModelError;

use super::tokenize::{vector_tokens, StopWords};

/// Count vectorizer over word n-grams with a bounded, alphabetically ordered vocabulary.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
    ngram_range: (usize, usize),
    stop_words: StopWords,
}

/// Fitted term-count matrix: one row per document, one column per feature.
#[derive(Debug, Clone)]
pub struct TermMatrix {
    pub features: Vec<String>,
    pub counts: Array2<f64>,
}

impl CountVectorizer {
    pub fn new(max_features: usize, ngram_range: (usize, usize)) -> Self {
        Self {
            max_features,
            ngram_range,
            stop_words: StopWords::english().clone(),
        }
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Build the vocabulary from `documents` and count every document against it.
    ///
    /// When the vocabulary exceeds `max_features`, the most frequent terms across
    /// the corpus are kept, ties resolved alphabetically.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TermMatrix, ModelError> {
        let analysed: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.analyse(doc.as_ref()))
            .collect();

        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &analysed {
            for term in terms {
                *totals.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if totals.is_empty() {
            return Err(ModelError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_features.max(1));
        let mut features: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        features.sort();

        let index: HashMap<&str, usize> = features
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();
        let mut counts = Array2::<f64>::zeros((documents.len(), features.len()));
        for (row, terms) in analysed.iter().enumerate() {
            for term in terms {
                if let Some(&col) = index.get(term.as_str()) {
                    counts[[row, col]] += 1.0;
                }
            }
        }
        Ok(TermMatrix { features, counts })
    }

    /// Lowercased tokens minus stop words, expanded into the configured n-grams.
    fn analyse(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = vector_tokens(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect();
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

/// Smoothed TF-IDF with L2-normalised rows over a fitted count matrix.
pub fn tfidf(matrix: &TermMatrix) -> Array2<f64> {
    let (n_docs, n_features) = matrix.counts.dim();
    let mut weights = matrix.counts.clone();
    for col in 0..n_features {
        let df = matrix.counts.column(col).iter().filter(|v| **v > 0.0).count();
        let idf = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
        weights.column_mut(col).mapv_inplace(|v| v * idf);
    }
    for mut row in weights.rows_mut() {
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }
    weights
}

/// Per-document TF-IDF scores over at most 20 uni/bi-gram features.
///
/// Only non-zero scores are kept. An empty vocabulary yields an empty map.
pub fn corpus_term_weights<S: AsRef<str>>(documents: &[S]) -> BTreeMap<usize, BTreeMap<String, f64>> {
    let vectorizer = CountVectorizer::new(20, (1, 2));
    let matrix = match vectorizer.fit_transform(documents) {
        Ok(matrix) => matrix,
        Err(err) => {
            warn!(error = %err, "skipping corpus term weights");
            return BTreeMap::new();
        }
    };
    let weights = tfidf(&matrix);
    weights
        .rows()
        .into_iter()
        .enumerate()
        .map(|(doc, row)| {
            let scores = row
                .iter()
                .zip(&matrix.features)
                .filter(|(score, _)| **score > 0.0)
                .map(|(score, term)| (term.clone(), *score))
                .collect();
            (doc, scores)
        })
        .collect()
}
