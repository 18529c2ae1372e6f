use kolmo_core::CoreError;

/// Errors from document chunking.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("invalid chunk window: max_chars={max_chars}, overlap={overlap} (overlap must be < max_chars)")]
    InvalidParameters { max_chars: usize, overlap: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ChunkResult<T> = Result<T, ChunkError>;
