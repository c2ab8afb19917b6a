//! Latent Dirichlet allocation fitted with batch variational Bayes.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::error::ModelError;

const MAX_DOC_UPDATE_ITERATIONS: usize = 100;
const MEAN_CHANGE_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdaConfig {
    pub n_topics: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl LdaConfig {
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            max_iterations: 10,
            seed: 42,
        }
    }
}

/// Fitted topic-word pseudo-counts, one row per topic.
#[derive(Debug, Clone)]
pub struct LdaModel {
    pub components: Array2<f64>,
}

/// Fit `config.n_topics` topics to a document-term count matrix.
///
/// Both Dirichlet priors are `1 / n_topics`.
pub fn fit(counts: &Array2<f64>, config: LdaConfig) -> Result<LdaModel, ModelError> {
    let (n_docs, n_features) = counts.dim();
    if config.n_topics == 0 {
        return Err(ModelError::Degenerate("n_topics must be positive".into()));
    }
    if n_docs == 0 || n_features == 0 {
        return Err(ModelError::EmptyVocabulary);
    }
    if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
        return Err(ModelError::Degenerate("counts must be finite and non-negative".into()));
    }

    let prior = 1.0 / config.n_topics as f64;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut components =
        Array2::from_shape_fn((config.n_topics, n_features), |_| gamma_like(&mut rng));
    let mut exp_topic_word = exp_dirichlet_expectation(&components);

    for iteration in 0..config.max_iterations {
        let mut sstats = Array2::<f64>::zeros((config.n_topics, n_features));
        for doc in counts.rows() {
            expect_document(&doc, &exp_topic_word, prior, &mut rng, &mut sstats);
        }
        sstats *= &exp_topic_word;
        components = sstats.mapv(|s| s + prior);
        exp_topic_word = exp_dirichlet_expectation(&components);
        if components.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Degenerate(format!(
                "non-finite topic weights at iteration {iteration}"
            )));
        }
    }
    debug!(topics = config.n_topics, features = n_features, docs = n_docs, "fitted LDA");
    Ok(LdaModel { components })
}

/// Variational E-step for one document, accumulating sufficient statistics.
fn expect_document(
    doc: &ArrayView1<'_, f64>,
    exp_topic_word: &Array2<f64>,
    prior: f64,
    rng: &mut StdRng,
    sstats: &mut Array2<f64>,
) {
    let ids: Vec<usize> = doc
        .iter()
        .enumerate()
        .filter(|(_, c)| **c > 0.0)
        .map(|(i, _)| i)
        .collect();
    if ids.is_empty() {
        return;
    }
    let cnts = Array1::from_iter(ids.iter().map(|&i| doc[i]));
    let topic_word = exp_topic_word.select(Axis(1), &ids);
    let n_topics = exp_topic_word.nrows();

    let mut doc_topic = Array1::from_shape_fn(n_topics, |_| gamma_like(rng));
    let mut exp_doc_topic = exp_dirichlet_expectation_1d(&doc_topic);
    for _ in 0..MAX_DOC_UPDATE_ITERATIONS {
        let previous = doc_topic.clone();
        let norm_phi = exp_doc_topic.dot(&topic_word).mapv(|v| v + f64::EPSILON);
        let ratio = &cnts / &norm_phi;
        doc_topic = &exp_doc_topic * &topic_word.dot(&ratio);
        doc_topic.mapv_inplace(|v| v + prior);
        exp_doc_topic = exp_dirichlet_expectation_1d(&doc_topic);
        let change = (&previous - &doc_topic).mapv(f64::abs).mean().unwrap_or(0.0);
        if change < MEAN_CHANGE_TOLERANCE {
            break;
        }
    }

    let norm_phi = exp_doc_topic.dot(&topic_word).mapv(|v| v + f64::EPSILON);
    let ratio = &cnts / &norm_phi;
    for (k, weight) in exp_doc_topic.iter().enumerate() {
        for (j, &feature) in ids.iter().enumerate() {
            sstats[[k, feature]] += weight * ratio[j];
        }
    }
}

/// A positive draw with mean 1 and standard deviation 0.1, approximating Gamma(100, 0.01).
fn gamma_like(rng: &mut StdRng) -> f64 {
    let normal: f64 = (0..12).map(|_| rng.gen::<f64>()).sum::<f64>() - 6.0;
    (1.0 + 0.1 * normal).max(0.5)
}

fn exp_dirichlet_expectation(alpha: &Array2<f64>) -> Array2<f64> {
    let mut out = alpha.clone();
    for mut row in out.rows_mut() {
        let total = digamma(row.sum());
        row.mapv_inplace(|v| (digamma(v) - total).exp());
    }
    out
}

fn exp_dirichlet_expectation_1d(alpha: &Array1<f64>) -> Array1<f64> {
    let total = digamma(alpha.sum());
    alpha.mapv(|v| (digamma(v) - total).exp())
}

/// The digamma function ψ(x) for x > 0.
pub fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln()
        - 0.5 * inv
        - inv2 * (1.0 / 12.0 - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0))))
}
