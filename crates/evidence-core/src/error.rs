//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The requested intent is not valid in the current lifecycle phase.
    #[error("invalid phase: expected {expected}, found {actual}")]
    InvalidPhase {
        /// The phase the intent requires.
        expected: &'static str,
        /// The phase the controller is in.
        actual: &'static str,
    },

    /// Content needed to play is missing or empty.
    #[error("content unavailable: {0}")]
    ContentUnavailable(String),

    /// A validation error in domain logic or in an input document.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
