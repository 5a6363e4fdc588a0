use thiserror::Error;

/// Error type for token signing and verification.
///
/// Verification failures are distinct so callers can tell an expired token
/// apart from a forged or garbled one; callers that only care about validity
/// can collapse them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
