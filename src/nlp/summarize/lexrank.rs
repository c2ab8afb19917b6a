//! LexRank: thresholded TF-IDF cosine graph with degree-normalised edges.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;

use crate::error::ModelError;

use super::power_method;

const THRESHOLD: f64 = 0.1;
const EPSILON: f64 = 0.1;
const MAX_ITERATIONS: usize = 1_000;

pub(super) fn scores(sentences: &[Vec<String>]) -> Result<Vec<f64>, ModelError> {
    let n = sentences.len();
    let tf: Vec<HashMap<&str, f64>> = sentences.iter().map(|s| term_frequencies(s)).collect();
    let idf = inverse_document_frequencies(sentences);

    let mut matrix = Array2::<f64>::zeros((n, n));
    let mut degrees = vec![0usize; n];
    for row in 0..n {
        for col in 0..n {
            let similarity = cosine(&tf[row], &tf[col], &idf);
            if similarity > THRESHOLD {
                matrix[[row, col]] = 1.0;
                degrees[row] += 1;
            }
        }
    }
    for (row, degree) in degrees.iter().enumerate() {
        let degree = (*degree).max(1) as f64;
        matrix.row_mut(row).mapv_inplace(|v| v / degree);
    }
    power_method(&matrix, EPSILON, MAX_ITERATIONS)
}

/// Term counts scaled by the most frequent term of the sentence.
fn term_frequencies(words: &[String]) -> HashMap<&str, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for word in words {
        *counts.entry(word.as_str()).or_insert(0.0) += 1.0;
    }
    let max = counts.values().copied().fold(0.0, f64::max).max(1.0);
    counts.values_mut().for_each(|v| *v /= max);
    counts
}

fn inverse_document_frequencies(sentences: &[Vec<String>]) -> HashMap<&str, f64> {
    let n = sentences.len() as f64;
    let sets: Vec<HashSet<&str>> = sentences
        .iter()
        .map(|s| s.iter().map(String::as_str).collect())
        .collect();
    let mut idf = HashMap::new();
    for set in &sets {
        for term in set {
            idf.entry(*term).or_insert_with(|| {
                let containing = sets.iter().filter(|s| s.contains(term)).count() as f64;
                (n / (1.0 + containing)).ln()
            });
        }
    }
    idf
}

fn cosine(first: &HashMap<&str, f64>, second: &HashMap<&str, f64>, idf: &HashMap<&str, f64>) -> f64 {
    let weight = |term: &str| idf.get(term).copied().unwrap_or(0.0);
    let numerator: f64 = first
        .iter()
        .filter_map(|(term, tf1)| {
            second
                .get(term)
                .map(|tf2| tf1 * tf2 * weight(term).powi(2))
        })
        .sum();
    let norm = |tf: &HashMap<&str, f64>| {
        tf.iter()
            .map(|(term, v)| (v * weight(term)).powi(2))
            .sum::<f64>()
    };
    let (d1, d2) = (norm(first), norm(second));
    if d1 > 0.0 && d2 > 0.0 {
        numerator / (d1.sqrt() * d2.sqrt())
    } else {
        0.0
    }
}
