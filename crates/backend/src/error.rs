//! Backend transport/query errors.

use thiserror::Error;

/// Failure talking to the hosted store.
///
/// These are infrastructure errors; domain failures (validation, invariants)
/// never originate here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never produced a usable response (network, TLS, poisoned
    /// state in the in-memory twin).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
