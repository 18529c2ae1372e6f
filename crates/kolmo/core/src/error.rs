/// Errors from the shared kolmo primitives.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
