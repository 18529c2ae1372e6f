//! CLI error types

use kolmo_annealer::AnnealError;
use kolmo_chunker::ChunkError;
use kolmo_condenser::CondenseError;
use kolmo_core::CoreError;
use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Chunk(#[from] ChunkError),

    #[error(transparent)]
    Condense(#[from] CondenseError),

    #[error(transparent)]
    Anneal(#[from] AnnealError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
