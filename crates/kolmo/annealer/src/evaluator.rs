use kolmo_core::{cosine_similarity, shannon_entropy, token_count, tokens};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::compressor::{DeflateEstimator, SizeEstimator};
use crate::embedder::{Embedder, HashingEmbedder};
use crate::error::AnnealError;
use crate::oracle::SampleOracle;
use crate::types::PromptCandidate;

/// Coefficients of the energy function.
///
/// `score = size·compressed_size + tokens·C + entropy·H − similarity·S + decay·D`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyWeights {
    pub size: f64,
    pub tokens: f64,
    pub entropy: f64,
    pub similarity: f64,
    pub decay: f64,
}

impl Default for EnergyWeights {
    fn default() -> Self {
        Self {
            size: 1.0,
            tokens: 0.0,
            entropy: 100.0,
            similarity: 1000.0,
            decay: 0.0,
        }
    }
}

impl EnergyWeights {
    pub fn energy(
        &self,
        compressed_size: usize,
        token_count: usize,
        entropy: f64,
        similarity: f64,
        decay: f64,
    ) -> f64 {
        self.size * compressed_size as f64
            + self.tokens * token_count as f64
            + self.entropy * entropy
            - self.similarity * similarity
            + self.decay * decay
    }
}

/// Outputs of the unmodified prompt, one per sample, and their embeddings.
#[derive(Clone, Debug)]
pub struct Baseline {
    pub outputs: Vec<String>,
    pub vectors: Vec<Vec<f32>>,
}

/// Scores candidates against a baseline using the measurement oracles.
pub struct EnergyEvaluator {
    oracle: Arc<dyn SampleOracle>,
    embedder: Arc<dyn Embedder>,
    estimator: Arc<dyn SizeEstimator>,
    weights: EnergyWeights,
}

impl EnergyEvaluator {
    pub fn new(oracle: Arc<dyn SampleOracle>) -> Self {
        Self {
            oracle,
            embedder: Arc::new(HashingEmbedder::default()),
            estimator: Arc::new(DeflateEstimator::default()),
            weights: EnergyWeights::default(),
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn SizeEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_weights(mut self, weights: EnergyWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &EnergyWeights {
        &self.weights
    }

    /// Invoke the oracle once per sample, in order. No samples means one
    /// empty sample. Failures are logged and yield `None`.
    pub async fn sample(&self, candidate: &str, samples: &[String]) -> Vec<Option<String>> {
        let empty = [String::new()];
        let inputs = if samples.is_empty() { &empty[..] } else { samples };

        let mut outputs = Vec::with_capacity(inputs.len());
        for (i, sample) in inputs.iter().enumerate() {
            match self.oracle.invoke(candidate, sample).await {
                Ok(output) => outputs.push(Some(output)),
                Err(e) => {
                    warn!(sample = i, error = %e, "oracle failed");
                    outputs.push(None);
                }
            }
        }
        outputs
    }

    /// Run the unmodified prompt over every sample.
    ///
    /// A failed sample becomes an empty output; if all fail there is
    /// nothing to compare against.
    pub async fn capture_baseline(
        &self,
        baseline_text: &str,
        samples: &[String],
    ) -> Result<Baseline, AnnealError> {
        let outputs = self.sample(baseline_text, samples).await;
        if outputs.iter().all(Option::is_none) {
            return Err(AnnealError::NoBaselineOutput);
        }
        let outputs: Vec<String> = outputs.into_iter().map(Option::unwrap_or_default).collect();
        let vectors = outputs.iter().map(|o| self.embedder.embed(o)).collect();
        Ok(Baseline { outputs, vectors })
    }

    /// Sample and score one candidate.
    pub async fn evaluate(
        &self,
        text: &str,
        samples: &[String],
        baseline: &Baseline,
    ) -> PromptCandidate {
        let outputs = self.sample(text, samples).await;
        self.score_outputs(text, &outputs, baseline)
    }

    /// Score a candidate from already-collected outputs.
    pub fn score_outputs(
        &self,
        text: &str,
        outputs: &[Option<String>],
        baseline: &Baseline,
    ) -> PromptCandidate {
        let length = token_count(text);
        let compressed_size = self.estimator.compressed_size(text);

        let mut vectors = Vec::with_capacity(outputs.len());
        let mut similarity_sum = 0.0;
        for (i, output) in outputs.iter().enumerate() {
            let Some(output) = output else { continue };
            let vector = self.embedder.embed(output);
            if let Some(reference) = baseline.vectors.get(i) {
                similarity_sum += cosine_similarity(&vector, reference);
            }
            vectors.push(vector);
        }
        let similarity = if outputs.is_empty() {
            0.0
        } else {
            similarity_sum / outputs.len() as f64
        };

        let entropy = shannon_entropy(outputs.iter().flatten().flat_map(|o| tokens(o)));
        let decay = mean_variance(&vectors);
        let score = self
            .weights
            .energy(compressed_size, length, entropy, similarity, decay);

        PromptCandidate {
            text: text.to_string(),
            score,
            length,
            chars: text.chars().count(),
            similarity,
            entropy,
            compressed_size,
            decay,
        }
    }
}

/// Mean over dimensions of the population variance across `vectors`.
fn mean_variance(vectors: &[Vec<f32>]) -> f64 {
    if vectors.len() <= 1 {
        return 0.0;
    }
    let dims = vectors[0].len();
    if dims == 0 {
        return 0.0;
    }
    let n = vectors.len() as f64;
    let mut total = 0.0;
    for d in 0..dims {
        let column = vectors.iter().map(|v| v.get(d).copied().unwrap_or(0.0) as f64);
        let mean = column.clone().sum::<f64>() / n;
        total += column.map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    }
    total / dims as f64
}
