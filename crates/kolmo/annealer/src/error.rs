/// Failure of a single oracle invocation. Recovered by the evaluator.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("failed to run oracle: {0}")]
    Spawn(String),
    #[error("oracle timed out after {0}ms")]
    Timeout(u64),
    #[error("oracle exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("oracle returned no output")]
    EmptyOutput,
}

/// Errors that abort an annealing run.
#[derive(Debug, thiserror::Error)]
pub enum AnnealError {
    #[error("no baseline output: every sample failed, nothing to preserve similarity against")]
    NoBaselineOutput,
    #[error("invalid initial temperature: {0}")]
    InvalidTemperature(f64),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
