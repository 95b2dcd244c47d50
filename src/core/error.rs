//! Error types for the core module.

/// Core error type.
///
/// Both variants are fatal transport-class failures: they are reported and
/// propagated, never retried. Missing credentials and malformed tool
/// arguments are not errors; they surface as
/// [`RunOutcome`](crate::core::runner::RunOutcome) variants instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport could not be established or the handshake failed.
    #[error("connection failed: {0}")]
    Connect(String),

    /// A request after the handshake failed or timed out.
    #[error("request failed: {0}")]
    Request(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
