use std::sync::Arc;

use async_trait::async_trait;
use authkit::Claims;
use authkit::PasswordError;
use authkit::PasswordHasher;
use authkit::TokenHasher;
use authkit::TokenKind;
use authkit::TokenSigner;
use chrono::Duration;
use chrono::Utc;

use crate::auth::errors::AuthError;
use crate::auth::models::EmailAddress;
use crate::auth::models::LoginCommand;
use crate::auth::models::ResetPasswordCommand;
use crate::auth::models::TokenPair;
use crate::auth::models::TokenValidation;
use crate::auth::models::UserId;
use crate::auth::ports::AuthServicePort;
use crate::auth::ports::ResetNotifier;
use crate::auth::ports::UserStore;
use crate::config::TokenConfig;

/// Verified against when an email has no account, so the unknown-email path
/// burns the same Argon2 work as a wrong password and stays indistinguishable
/// from it.
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-timing-equalizer";

/// Domain service implementing credential verification and token issuance.
///
/// Stateless between calls; all persistence goes through the injected store.
pub struct AuthService<S, N>
where
    S: UserStore,
    N: ResetNotifier,
{
    store: Arc<S>,
    notifier: Arc<N>,
    password_hasher: PasswordHasher,
    token_hasher: TokenHasher,
    access_signer: TokenSigner,
    refresh_signer: TokenSigner,
    access_ttl: Duration,
    refresh_ttl: Duration,
    reset_ttl: Duration,
    unknown_user_hash: String,
}

impl<S, N> AuthService<S, N>
where
    S: UserStore,
    N: ResetNotifier,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing the timing-equalizer secret failed
    pub fn new(store: Arc<S>, notifier: Arc<N>, tokens: &TokenConfig) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let unknown_user_hash = password_hasher.hash(UNKNOWN_USER_PASSWORD)?;

        Ok(Self {
            access_signer: TokenSigner::new(tokens.signing_secret.as_bytes()),
            refresh_signer: TokenSigner::new(tokens.refresh_secret().as_bytes()),
            token_hasher: TokenHasher::new(tokens.hash_key().as_bytes()),
            access_ttl: Duration::minutes(tokens.access_ttl_minutes),
            refresh_ttl: Duration::days(tokens.refresh_ttl_days),
            reset_ttl: Duration::minutes(tokens.reset_ttl_minutes),
            store,
            notifier,
            password_hasher,
            unknown_user_hash,
        })
    }

    fn mint_pair(&self, user_id: UserId, email: &EmailAddress) -> Result<TokenPair, AuthError> {
        let access_token = self
            .access_signer
            .issue(&Claims::access(user_id.0, email.as_str(), self.access_ttl))?;
        let refresh_token = self
            .refresh_signer
            .issue(&Claims::refresh(user_id.0, self.refresh_ttl))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl<S, N> AuthServicePort for AuthService<S, N>
where
    S: UserStore,
    N: ResetNotifier,
{
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        if command.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let Some(credentials) = self.store.find_credentials_by_email(&command.email).await? else {
            let _ = self
                .password_hasher
                .verify(&command.password, &self.unknown_user_hash);
            return Err(AuthError::InvalidCredentials);
        };

        let password_matches = self
            .password_hasher
            .verify(&command.password, &credentials.password_hash)?;
        if !password_matches {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.mint_pair(credentials.user_id, &credentials.email)?;

        // A pair is only handed out once its refresh token is durably stored;
        // a storage fault here fails the whole login.
        let refresh_hash = self.token_hasher.hash(&pair.refresh_token);
        self.store
            .set_refresh_token_hash(&credentials.user_id, &refresh_hash)
            .await?;

        tracing::debug!(user_id = %credentials.user_id, "login succeeded");
        Ok(pair)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = self
            .refresh_signer
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidToken)?;
        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::InvalidToken);
        }

        let presented_hash = self.token_hasher.hash(refresh_token);
        let user = self
            .store
            .find_by_refresh_token_hash(&presented_hash)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let pair = self.mint_pair(user.id, &user.email)?;
        let next_hash = self.token_hasher.hash(&pair.refresh_token);

        let rotated = self
            .store
            .rotate_refresh_token_hash(&user.id, &presented_hash, &next_hash)
            .await?;
        if !rotated {
            // Lost a race against a concurrent exchange; the presented token
            // has already been rotated away.
            return Err(AuthError::InvalidToken);
        }

        tracing::debug!(user_id = %user.id, "refresh token rotated");
        Ok(pair)
    }

    async fn validate_token(&self, token: &str) -> TokenValidation {
        match self.access_signer.verify(token) {
            Ok(claims) if claims.kind == TokenKind::Access => TokenValidation::Valid { claims },
            Ok(_) | Err(_) => TokenValidation::Invalid,
        }
    }

    async fn request_password_reset(&self, email: &EmailAddress) -> Result<String, AuthError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let reset_token = authkit::generate_token();
        let token_hash = self.token_hasher.hash(&reset_token);
        let expires_at = Utc::now() + self.reset_ttl;

        self.store
            .store_reset_token(&user.id, &token_hash, expires_at)
            .await?;

        if let Err(e) = self
            .notifier
            .deliver_reset_token(&user.email, &reset_token)
            .await
        {
            tracing::error!(user_id = %user.id, error = %e, "reset token delivery failed");
        }

        tracing::debug!(user_id = %user.id, "password reset requested");
        Ok(reset_token)
    }

    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), AuthError> {
        if command.token.is_empty() {
            return Err(AuthError::ResetTokenInvalid);
        }

        let token_hash = self.token_hasher.hash(&command.token);
        let pending = self
            .store
            .find_pending_reset_by_token_hash(&token_hash)
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        if Utc::now() > pending.expires_at {
            return Err(AuthError::ResetTokenExpired);
        }

        let new_password_hash = self.password_hasher.hash(&command.new_password)?;

        let completed = self
            .store
            .complete_password_reset(&pending.user_id, &token_hash, &new_password_hash)
            .await?;
        if !completed {
            return Err(AuthError::ResetTokenInvalid);
        }

        tracing::debug!(user_id = %pending.user_id, "password reset completed");
        Ok(())
    }
}
