//! Simulated-annealing driver.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::AnnealError;
use crate::evaluator::EnergyEvaluator;
use crate::mutation::mutate;
use crate::types::{AnnealReport, AnnealingState, Improvement, RunPhase};

/// Temperature floor of the linear schedule.
pub const MIN_TEMPERATURE: f64 = 0.01;

/// Linear cooling from `initial` toward zero, floored at [`MIN_TEMPERATURE`].
pub fn temperature_at(step: usize, iterations: usize, initial: f64) -> f64 {
    if iterations == 0 {
        return initial.max(MIN_TEMPERATURE);
    }
    let progress = step as f64 / iterations as f64;
    (initial * (1.0 - progress)).max(MIN_TEMPERATURE)
}

/// `min(1, exp(-delta / temperature))`.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        return 1.0;
    }
    (-delta / temperature).exp().min(1.0)
}

/// Metropolis rule with an externally drawn uniform `draw` in `[0, 1)`.
pub fn metropolis_accept(delta: f64, temperature: f64, draw: f64) -> bool {
    delta < 0.0 || draw < (-delta / temperature).exp()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    pub iterations: usize,
    pub initial_temperature: f64,
    /// Seed for the run's RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Where the best candidate is written on every strict improvement.
    pub artifact_path: Option<PathBuf>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            initial_temperature: 1.0,
            seed: None,
            artifact_path: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = Some(path.into());
        self
    }
}

/// Orchestrates mutation, evaluation and Metropolis acceptance.
pub struct AnnealingScheduler {
    evaluator: EnergyEvaluator,
    config: AnnealConfig,
    rng: StdRng,
}

impl AnnealingScheduler {
    pub fn new(evaluator: EnergyEvaluator, config: AnnealConfig) -> Result<Self, AnnealError> {
        let t0 = config.initial_temperature;
        if !t0.is_finite() || t0 <= 0.0 {
            return Err(AnnealError::InvalidTemperature(t0));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            evaluator,
            config,
            rng,
        })
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Anneal `baseline_text` against `samples` and return the best candidate found.
    pub async fn run(
        &mut self,
        baseline_text: &str,
        samples: &[String],
    ) -> Result<AnnealReport, AnnealError> {
        let baseline = self.evaluator.capture_baseline(baseline_text, samples).await?;
        let baseline_candidate = self
            .evaluator
            .evaluate(baseline_text, samples, &baseline)
            .await;
        info!(
            score = baseline_candidate.score,
            length = baseline_candidate.length,
            chars = baseline_candidate.chars,
            samples = baseline.outputs.len(),
            "baseline captured"
        );

        let iterations = self.config.iterations;
        let t0 = self.config.initial_temperature;
        let mut state = AnnealingState::new(baseline_candidate.clone(), t0);
        let mut accepted = 0usize;
        let mut improvements = Vec::new();

        state.phase = RunPhase::Iterating;
        for step in 0..iterations {
            state.step = step;
            state.temperature = temperature_at(step, iterations, t0);

            let mutation = mutate(&state.current_lines, &mut self.rng);
            let candidate = self
                .evaluator
                .evaluate(&mutation.text(), samples, &baseline)
                .await;

            let delta = candidate.score - state.best.score;
            let draw: f64 = self.rng.gen();
            if !metropolis_accept(delta, state.temperature, draw) {
                continue;
            }

            accepted += 1;
            debug!(step, kind = ?mutation.kind, delta, "accepted");
            state.current_lines = mutation.lines;

            if candidate.is_better_than(&state.best) {
                if let Some(path) = &self.config.artifact_path {
                    tokio::fs::write(path, &candidate.text).await?;
                }
                info!(
                    step,
                    score = candidate.score,
                    length = candidate.length,
                    chars = candidate.chars,
                    similarity = candidate.similarity,
                    "improved"
                );
                improvements.push(Improvement {
                    step,
                    score: candidate.score,
                    length: candidate.length,
                    similarity: candidate.similarity,
                });
                state.best = candidate;
            }
        }
        state.phase = RunPhase::Done;

        info!(
            baseline = baseline_candidate.score,
            best = state.best.score,
            accepted,
            improvements = improvements.len(),
            "annealing done"
        );
        Ok(AnnealReport {
            baseline: baseline_candidate,
            best: state.best,
            steps: iterations,
            accepted,
            improvements,
        })
    }
}
