#![deny(unsafe_code)]
//! # kolmo-annealer
//!
//! Shrinks a prompt by simulated annealing. Each step applies one
//! structural edit ([`mutation`]), scores the result with an energy
//! function ([`evaluator`]) and accepts or rejects it by the Metropolis
//! rule ([`scheduler`]).
//!
//! The energy depends on three measurement oracles, all pluggable:
//! a [`SampleOracle`] that produces outputs for a candidate, an
//! [`Embedder`] for output similarity, and a [`SizeEstimator`] for the
//! compressed size of the candidate.

pub mod compressor;
pub mod embedder;
pub mod error;
pub mod evaluator;
pub mod mutation;
pub mod oracle;
pub mod reduce;
pub mod scheduler;
pub mod types;

pub use compressor::{DeflateEstimator, SizeEstimator};
pub use embedder::{Embedder, HashingEmbedder};
pub use error::{AnnealError, OracleError};
pub use evaluator::{Baseline, EnergyEvaluator, EnergyWeights};
pub use mutation::{mutate, Mutation, MutationKind};
pub use oracle::{CommandOracle, FailingOracle, SampleOracle, SimulatedOracle};
pub use reduce::{classical_reduce, ReductionReport};
pub use scheduler::{
    acceptance_probability, metropolis_accept, temperature_at, AnnealConfig,
    AnnealingScheduler, MIN_TEMPERATURE,
};
pub use types::{AnnealReport, AnnealingState, Improvement, PromptCandidate, RunPhase};
