//! Common error types shared across crates.

use thiserror::Error;

/// Message shown to users for any stored value that cannot be decrypted.
///
/// Wrong-secret and corrupted-envelope failures both surface with this exact
/// text so that callers cannot tell them apart.
pub const UNREADABLE_MESSAGE: &str = "cannot read stored value";

/// Top-level service error type.
///
/// Variants map to process exit codes returned by the CLI:
/// - [`ServiceError::Internal`] → 1
/// - [`ServiceError::BadRequest`] → 2
/// - [`ServiceError::Unreadable`] → 3
/// - [`ServiceError::Unavailable`] → 4
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The input was malformed — invalid JSON or a missing argument.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A stored envelope could not be decrypted.
    ///
    /// Carries no detail on purpose: the cause (wrong secret, tampering, bad
    /// format) must not leak to callers.
    #[error("{}", UNREADABLE_MESSAGE)]
    Unreadable,

    /// A required resource (e.g. the previous secret) is not configured.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ServiceError::Internal(_) => 1,
            ServiceError::BadRequest(_) => 2,
            ServiceError::Unreadable => 3,
            ServiceError::Unavailable(_) => 4,
        }
    }
}
