use thiserror::Error;

/// Errors surfaced by training runs and artifact I/O.
///
/// Dimension mismatches signal a configuration error and abort the run;
/// missing input artifacts are handled at the call site by regenerating
/// defaults, so they never reach callers as `Io`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dimension mismatch: {expected} predictions vs {actual} targets")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
