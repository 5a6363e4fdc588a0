use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::auth::errors::AuthError;
use crate::auth::errors::NotifierError;
use crate::auth::errors::StoreError;
use crate::auth::models::Credentials;
use crate::auth::models::EmailAddress;
use crate::auth::models::LoginCommand;
use crate::auth::models::PendingReset;
use crate::auth::models::ResetPasswordCommand;
use crate::auth::models::TokenPair;
use crate::auth::models::TokenValidation;
use crate::auth::models::User;
use crate::auth::models::UserId;

/// Port for the authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify email/password credentials and issue a fresh token pair.
    ///
    /// Issuing rotates the stored refresh token: any previously issued
    /// refresh token stops working.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (uniform)
    /// * `Storage` - Persisting the rotated refresh token failed; the login
    ///   did not take effect
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Exchange a valid refresh token for a brand-new pair.
    ///
    /// Rotation is atomic: of two concurrent exchanges of the same token,
    /// exactly one succeeds and the presented token is dead afterwards.
    ///
    /// # Errors
    /// * `MissingToken` - Empty input; the store is never consulted
    /// * `InvalidToken` - Expired/forged token, no matching user, or a lost
    ///   rotation race
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Check whether a bearer token is currently good.
    ///
    /// Never fails for routine bad input: every verification failure is an
    /// `Invalid` result.
    async fn validate_token(&self, token: &str) -> TokenValidation;

    /// Start a password reset, returning the plaintext reset token for
    /// out-of-band delivery. The token is stored only as a keyed digest and
    /// replaces any earlier pending reset.
    ///
    /// # Errors
    /// * `UserNotFound` - No account under this email
    async fn request_password_reset(&self, email: &EmailAddress) -> Result<String, AuthError>;

    /// Consume a reset token and install a new password.
    ///
    /// # Errors
    /// * `ResetTokenInvalid` - No pending reset matches the token digest, or
    ///   the reset was consumed concurrently
    /// * `ResetTokenExpired` - Digest matches but the reset window has closed
    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), AuthError>;
}

/// Credential-store read/write contract.
///
/// Tokens are looked up by their keyed digest, never by plaintext. The two
/// `*_hash`-conditioned mutations are compare-and-swap primitives: they only
/// apply while the stored digest still matches, which is what makes rotation
/// and reset consumption race-safe regardless of backend.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Fetch the login projection, password hash included.
    ///
    /// The default projection hides secret columns; login asks for them
    /// explicitly through this method.
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credentials>, StoreError>;

    /// Fetch the default projection by normalized email.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError>;

    /// Locate the user currently holding this refresh-token digest.
    async fn find_by_refresh_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Locate the pending reset whose stored digest matches, if any.
    ///
    /// Matching is by digest equality; a user merely having *some* pending
    /// reset is not a match.
    async fn find_pending_reset_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PendingReset>, StoreError>;

    /// Store a refresh-token digest unconditionally (login rotation).
    async fn set_refresh_token_hash(
        &self,
        id: &UserId,
        token_hash: &str,
    ) -> Result<(), StoreError>;

    /// Swap the refresh-token digest, conditioned on the current one.
    ///
    /// # Returns
    /// `false` when the stored digest no longer equals `current_hash` - the
    /// token was already rotated by a concurrent exchange.
    async fn rotate_refresh_token_hash(
        &self,
        id: &UserId,
        current_hash: &str,
        next_hash: &str,
    ) -> Result<bool, StoreError>;

    /// Store a reset-token digest and expiry, replacing any pending reset.
    async fn store_reset_token(
        &self,
        id: &UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Install a new password hash and clear the reset columns, conditioned
    /// on the stored reset digest.
    ///
    /// # Returns
    /// `false` when the stored digest no longer equals `reset_token_hash`.
    async fn complete_password_reset(
        &self,
        id: &UserId,
        reset_token_hash: &str,
        new_password_hash: &str,
    ) -> Result<bool, StoreError>;
}

/// Out-of-band delivery of freshly issued reset tokens.
///
/// Invoked best-effort after the digest is stored; delivery guarantees are
/// the implementation's concern.
#[async_trait]
pub trait ResetNotifier: Send + Sync + 'static {
    async fn deliver_reset_token(
        &self,
        email: &EmailAddress,
        reset_token: &str,
    ) -> Result<(), NotifierError>;
}
