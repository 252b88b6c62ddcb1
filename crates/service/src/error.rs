//! Typed error enum for the service layer.
//!
//! Unifies validation and storage failures into a single error type so
//! handlers can map each failure mode to a status code.

use teleprompter_core::CoreError;
use teleprompter_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying validation and storage failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, pool exhaustion).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (missing field, `/` in id).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => Self::InvalidInput(msg),
        }
    }
}
