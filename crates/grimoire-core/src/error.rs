//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Failures reported by the oracle, the storyteller or the transport are not
/// caught by the engine: they propagate out of the session loop and abort the
/// session.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A script source could not be interpreted as a list of role records.
    #[error("malformed script: {0}")]
    MalformedScript(String),

    /// The decision oracle failed to produce an answer.
    #[error("oracle error: {0}")]
    Oracle(String),

    /// The storyteller failed while applying ops or awaiting a response.
    #[error("storyteller error: {0}")]
    Storyteller(String),

    /// The human-facing transport failed or was closed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
