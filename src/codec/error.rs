//! Import/export error types
//!
//! Import failures are surfaced to the user as a blocking notice; the
//! store is left untouched when any of these occur.

use thiserror::Error;

/// Import/export codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// Represents a JSON parse error in the imported text
    #[error("Could not parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The parsed payload was valid JSON but not an array
    #[error("Imported JSON must be an array of places")]
    NotAnArray,

    /// Every element was dropped during normalization
    #[error("No valid places found in the imported data")]
    NoValidPlaces,
}
