use serde::{Deserialize, Serialize};
use std::fmt;

/// A scored prompt text. Lower `score` is better.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptCandidate {
    pub text: String,
    /// Energy value.
    pub score: f64,
    /// Whitespace token count. Mutations and the token weight act on this.
    pub length: usize,
    /// Character count of `text`, for progress reporting.
    pub chars: usize,
    /// Mean cosine similarity of sampled outputs to the baseline outputs.
    pub similarity: f64,
    /// Shannon entropy (bits) of the pooled output tokens.
    pub entropy: f64,
    /// Compressed size of `text`, in bytes.
    pub compressed_size: usize,
    /// Mean per-dimension variance of the output embeddings.
    pub decay: f64,
}

impl PromptCandidate {
    pub fn is_better_than(&self, other: &PromptCandidate) -> bool {
        self.score < other.score
    }
}

impl fmt::Display for PromptCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score={:.2} len={} chars={} sim={:.3} entropy={:.3} bytes={}",
            self.score,
            self.length,
            self.chars,
            self.similarity,
            self.entropy,
            self.compressed_size
        )
    }
}

/// Lifecycle of an annealing run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Init,
    Iterating,
    Done,
}

/// Mutable search state, owned by one run.
#[derive(Clone, Debug)]
pub struct AnnealingState {
    pub current_lines: Vec<String>,
    pub best: PromptCandidate,
    pub step: usize,
    pub temperature: f64,
    pub phase: RunPhase,
}

impl AnnealingState {
    pub fn new(baseline: PromptCandidate, initial_temperature: f64) -> Self {
        Self {
            current_lines: baseline.text.lines().map(str::to_string).collect(),
            best: baseline,
            step: 0,
            temperature: initial_temperature,
            phase: RunPhase::Init,
        }
    }
}

/// A strictly improving discovery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub step: usize,
    pub score: f64,
    pub length: usize,
    pub similarity: f64,
}

/// Outcome of a finished run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnnealReport {
    pub baseline: PromptCandidate,
    pub best: PromptCandidate,
    pub steps: usize,
    pub accepted: usize,
    pub improvements: Vec<Improvement>,
}

impl AnnealReport {
    pub fn improved(&self) -> bool {
        !self.improvements.is_empty()
    }
}
