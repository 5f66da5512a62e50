//! Common error types for AMPM

use thiserror::Error;

/// Common result type for AMPM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the AMPM binaries
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Upstream returned a non-success status; body is relayed verbatim
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport-level failure reaching the upstream service
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream call exceeded the request timeout
    #[error("Upstream timeout: {0}")]
    Timeout(String),

    /// Upstream response did not match the expected shape
    #[error("Unexpected upstream response shape: {0}")]
    UpstreamShape(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
