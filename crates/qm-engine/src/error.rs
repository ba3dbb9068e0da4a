use thiserror::Error;

/// Failures surfaced by the session registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session id is unknown, expired, or already completed.
    #[error("quiz session not found")]
    NotFound,
}
