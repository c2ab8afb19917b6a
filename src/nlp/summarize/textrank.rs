//! TextRank sentence centrality over a shared-word similarity graph.

use ndarray::Array2;

use crate::error::ModelError;

use super::power_method;

const DAMPING: f64 = 0.85;
const EPSILON: f64 = 1e-4;
const MAX_ITERATIONS: usize = 1_000;
const ZERO_DIVISION_GUARD: f64 = 1e-7;

pub(super) fn scores(sentences: &[Vec<String>]) -> Result<Vec<f64>, ModelError> {
    let n = sentences.len();
    let mut weights = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in i..n {
            let rating = edge(&sentences[i], &sentences[j]);
            weights[[i, j]] = rating;
            weights[[j, i]] = rating;
        }
    }
    for mut row in weights.rows_mut() {
        let total = row.sum() + ZERO_DIVISION_GUARD;
        row.mapv_inplace(|v| v / total);
    }
    let matrix = weights.mapv(|w| (1.0 - DAMPING) / n as f64 + DAMPING * w);
    power_method(&matrix, EPSILON, MAX_ITERATIONS)
}

/// Occurrences of the first sentence's words in the second, normalised by log lengths.
fn edge(first: &[String], second: &[String]) -> f64 {
    let overlap: usize = first
        .iter()
        .map(|w| second.iter().filter(|o| *o == w).count())
        .sum();
    if overlap == 0 {
        return 0.0;
    }
    let norm = (first.len() as f64).ln() + (second.len() as f64).ln();
    if norm.abs() < 1e-12 {
        overlap as f64
    } else {
        overlap as f64 / norm
    }
}
