//! Error types for simulator construction and runs.

/// Failures that abort a simulation before any result is produced.
///
/// Degenerate statistics (zero denominators, empty sample sets) are not
/// errors; they surface as `NaN` or the configured fallback values.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("malformed request: {0}")]
    Request(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
