//! Error types used across the simple kernel.

use thiserror::Error;

/// Result type for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Invalid argument provided at construction time.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A bootstrapper failed while running its bootstrap step.
    #[error("bootstrap error: {0}")]
    Bootstrap(String),

    /// A middleware failed or refused to forward a bootstrap call.
    #[error("middleware error: {0}")]
    Middleware(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

// Implement From for common error types to enable `?` operator
impl From<serde_json::Error> for KernelError {
    fn from(err: serde_json::Error) -> Self {
        KernelError::Config(format!("JSON error: {}", err))
    }
}

impl From<String> for KernelError {
    fn from(err: String) -> Self {
        KernelError::Internal(err)
    }
}

impl From<&str> for KernelError {
    fn from(err: &str) -> Self {
        KernelError::Internal(err.to_string())
    }
}
