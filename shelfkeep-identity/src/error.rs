//! Error types for the identity workflows.

use shelfkeep_core::error::StoreError;
use thiserror::Error;

/// Everything that can stop a login, registration or security-question check.
///
/// A user that does not exist surfaces as [`IdentityError::Store`] wrapping
/// [`StoreError::NotFound`], so callers can tell a missing account apart from a
/// failed check with [`IdentityError::is_not_found`].
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The email or the password was empty.
    #[error("Email and password are required")]
    MissingCredentials,
    /// The password did not verify against the stored digest.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// The security-question submission did not have the expected shape.
    #[error("Malformed security question answers")]
    MalformedAnswers,
    /// At least one submitted answer did not match the stored answer at its position.
    #[error("Security question answers do not match")]
    AnswersMismatch,
    /// The configured hashing cost parameters were rejected.
    #[error("Invalid hashing configuration: {0}")]
    InvalidHashingConfig(String),
    /// The hashing backend failed to produce a digest.
    #[error("Hashing error: {0}")]
    Hashing(String),
    /// The user lookup or the record conversion failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IdentityError {
    /// Returns `true` if the user the request referred to does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IdentityError::Store(err) if err.is_not_found())
    }
}

/// A specialized `Result` type for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;
