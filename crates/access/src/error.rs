//! Access-layer errors.

use thiserror::Error;

use campana_backend::BackendError;

/// Failure of an entity operation.
///
/// Reads never produce these (they soft-fail to empty collections); every
/// mutation surfaces one on failure, with no retry or compensation.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The viewer lacks the capability for this operation.
    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    /// No record with this id inside the viewer's scope.
    #[error("not found")]
    NotFound,

    /// A lifecycle rule rejected the change (e.g. reopening a settled alert).
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// Row (de)serialization failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// The backend call itself failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        AccessError::Codec(err.to_string())
    }
}
