use kolmo_core::CoreError;
use std::path::PathBuf;

/// Errors from condensation.
#[derive(Debug, thiserror::Error)]
pub enum CondenseError {
    #[error("nothing to condense under {}", .0.display())]
    EmptyCorpus(PathBuf),
    #[error("similarity threshold {0} outside [0, 1]")]
    InvalidThreshold(f64),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("atomic swap failed: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type CondenseResult<T> = Result<T, CondenseError>;
