use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::errors::EmailError;
use crate::auth::errors::UserIdError;

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format (RFC 5322 compliant parser) and normalizes: the stored
/// form is trimmed and lowercased, so every lookup and write sees the same
/// key regardless of how the caller cased it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, normalized email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = email.as_ref().trim();
        email_address::EmailAddress::from_str(email)
            .map(|_| EmailAddress(email.to_lowercase()))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Default read projection of a user record.
///
/// Secret columns (password hash, token hashes) are deliberately absent;
/// operations that need them ask the store for the dedicated projection.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

/// Login projection: identity plus the stored password hash.
///
/// Only the login path requests this; it never leaves the domain layer.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// A pending password reset located by its token digest.
#[derive(Debug, Clone)]
pub struct PendingReset {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub expires_at: DateTime<Utc>,
}

/// Freshly minted access/refresh token pair. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Command to authenticate a user with email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Command to complete a password reset with a delivered token.
#[derive(Debug)]
pub struct ResetPasswordCommand {
    pub token: String,
    pub new_password: String,
}

/// Outcome of a bearer-token validation check.
///
/// Invalidity is a normal result here, not an error: expired, malformed, and
/// forged tokens all land on `Invalid`. Callers that need to distinguish
/// those cases verify through the signer directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    Valid { claims: authkit::Claims },
    Invalid,
}

impl TokenValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenValidation::Valid { .. })
    }
}
