//! Store-specific error types
//!
//! Failures here come either from the embedded key-value backend or from
//! serializing the collection for persistence. Read-side problems are
//! deliberately not represented: a missing or corrupt persisted payload
//! degrades to an empty collection instead of raising an error.

use thiserror::Error;

/// Place store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Backend error: {0}")]
    BackendError(#[from] sled::Error),

    /// Represents a JSON serialization error while persisting
    #[error("Error while serializing places: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Backend payload was not valid UTF-8
    #[error("Backend payload is not valid UTF-8")]
    InvalidPayload,
}
