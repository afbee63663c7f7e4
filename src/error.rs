use thiserror::Error;

/// Top-level error type for stroke outlining.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric input.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// Errors related to outlining operations.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Caller or data misconfiguration, such as an unknown join or cap code.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for results using [`OutlineError`].
pub type Result<T> = std::result::Result<T, OutlineError>;
