//! Latent semantic analysis ranking via the SVD of a smoothed term/sentence matrix.

use std::collections::HashMap;

use ndarray::Array2;

use crate::error::ModelError;

const MIN_DIMENSIONS: usize = 3;
const REDUCTION_RATIO: f64 = 1.0;
const SMOOTHING: f64 = 0.4;
const MAX_SWEEPS: usize = 100;

pub(super) fn scores(sentences: &[Vec<String>]) -> Result<Vec<f64>, ModelError> {
    let matrix = term_sentence_matrix(sentences)?;
    let gram = matrix.t().dot(&matrix);
    let (eigenvalues, vectors) = symmetric_eigen(gram)?;

    let rank = matrix.ncols().min(matrix.nrows());
    let dimensions = MIN_DIMENSIONS.max((rank as f64 * REDUCTION_RATIO) as usize);
    let powers: Vec<f64> = eigenvalues
        .iter()
        .enumerate()
        .map(|(k, value)| if k < dimensions { value.max(0.0) } else { 0.0 })
        .collect();

    Ok((0..vectors.nrows())
        .map(|sentence| {
            powers
                .iter()
                .enumerate()
                .map(|(k, power)| power * vectors[[sentence, k]].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect())
}

/// Word-by-sentence counts with each non-empty column scaled as `a + (1-a)·v/max`.
fn term_sentence_matrix(sentences: &[Vec<String>]) -> Result<Array2<f64>, ModelError> {
    let mut dictionary: HashMap<&str, usize> = HashMap::new();
    for word in sentences.iter().flatten() {
        let next = dictionary.len();
        dictionary.entry(word.as_str()).or_insert(next);
    }
    if dictionary.is_empty() {
        return Err(ModelError::EmptyVocabulary);
    }

    let mut matrix = Array2::<f64>::zeros((dictionary.len(), sentences.len()));
    for (col, words) in sentences.iter().enumerate() {
        for word in words {
            matrix[[dictionary[word.as_str()], col]] += 1.0;
        }
    }
    for mut column in matrix.columns_mut() {
        let max = column.iter().copied().fold(0.0, f64::max);
        if max != 0.0 {
            column.mapv_inplace(|v| SMOOTHING + (1.0 - SMOOTHING) * v / max);
        }
    }
    Ok(matrix)
}

/// Cyclic Jacobi eigen-decomposition of a symmetric matrix.
///
/// Returns eigenvalues in descending order and the matching eigenvectors as columns.
pub(crate) fn symmetric_eigen(mut a: Array2<f64>) -> Result<(Vec<f64>, Array2<f64>), ModelError> {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);
    let scale = a.iter().map(|x| x * x).sum::<f64>().sqrt().max(1.0);

    for _ in 0..MAX_SWEEPS {
        let off_diagonal: f64 = a
            .indexed_iter()
            .filter(|((i, j), _)| i != j)
            .map(|(_, x)| x * x)
            .sum();
        if !off_diagonal.is_finite() {
            return Err(ModelError::Degenerate("non-finite Gram matrix".into()));
        }
        if off_diagonal.sqrt() <= 1e-12 * scale {
            return Ok(sorted_pairs(&a, v));
        }
        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq.abs() <= f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;
                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }
    Err(ModelError::NoConvergence {
        iterations: MAX_SWEEPS,
    })
}

fn sorted_pairs(a: &Array2<f64>, v: Array2<f64>) -> (Vec<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|x, y| a[[*y, *y]].total_cmp(&a[[*x, *x]]));
    let values = order.iter().map(|&k| a[[k, k]]).collect();
    let mut vectors = Array2::<f64>::zeros((n, n));
    for (dst, &src) in order.iter().enumerate() {
        vectors.column_mut(dst).assign(&v.column(src));
    }
    (values, vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn eigen_of_small_symmetric_matrix() {
        let (values, vectors) = symmetric_eigen(array![[2.0, 1.0], [1.0, 2.0]]).unwrap();
        assert!((values[0] - 3.0).abs() < 1e-9);
        assert!((values[1] - 1.0).abs() < 1e-9);
        let leading = vectors.column(0);
        assert!((leading[0].abs() - leading[1].abs()).abs() < 1e-9);
    }

    #[test]
    fn sentence_ranks_match_column_norms() {
        // With every dimension kept, rank_j equals the L2 norm of column j.
        let sentences = vec![
            vec!["market".to_string(), "stock".to_string()],
            vec!["market".to_string()],
            vec!["rain".to_string(), "cloud".to_string(), "rain".to_string()],
        ];
        let matrix = term_sentence_matrix(&sentences).unwrap();
        let ranks = scores(&sentences).unwrap();
        for (j, rank) in ranks.iter().enumerate() {
            let norm = matrix.column(j).iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((rank - norm).abs() < 1e-6, "sentence {j}: {rank} vs {norm}");
        }
    }

    #[test]
    fn empty_dictionary_is_an_error() {
        let sentences = vec![Vec::new(), Vec::new()];
        assert!(matches!(
            term_sentence_matrix(&sentences),
            Err(ModelError::EmptyVocabulary)
        ));
    }
}
