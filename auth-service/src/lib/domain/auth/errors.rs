use authkit::JwtError;
use authkit::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for credential-store operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Error for reset-token delivery
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Top-level error for all authentication operations.
///
/// Closed taxonomy, matched exhaustively at the transport boundary; the first
/// six variants are domain outcomes, the rest are infrastructure faults that
/// surface as a generic internal error.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token is required")]
    MissingToken,

    #[error("Refresh token is invalid")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Reset token is invalid")]
    ResetTokenInvalid,

    #[error("Reset token is expired")]
    ResetTokenExpired,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token signing error: {0}")]
    Signing(#[from] JwtError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
