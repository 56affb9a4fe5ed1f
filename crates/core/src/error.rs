//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid range header: {0}")]
    InvalidRange(String),

    #[error("range not satisfiable within {total} bytes")]
    RangeNotSatisfiable { total: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
