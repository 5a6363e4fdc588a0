use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth_service::auth::errors::StoreError;
use auth_service::auth::models::Credentials;
use auth_service::auth::models::EmailAddress;
use auth_service::auth::models::PendingReset;
use auth_service::auth::models::User;
use auth_service::auth::models::UserId;
use auth_service::auth::ports::UserStore;
use auth_service::auth::service::AuthService;
use auth_service::config::TokenConfig;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::notifier::LogResetNotifier;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

/// Test application that spawns a real server over an in-memory store.
///
/// Registration is an external process in production, so tests seed accounts
/// directly through the store handle.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub store: Arc<InMemoryUserStore>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let notifier = Arc::new(LogResetNotifier);

        let tokens = TokenConfig {
            signing_secret: "test-signing-secret-at-least-32-bytes!".to_string(),
            refresh_signing_secret: None,
            token_hash_key: None,
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            reset_ttl_minutes: 60,
        };

        let auth_service = Arc::new(
            AuthService::new(Arc::clone(&store), notifier, &tokens)
                .expect("Failed to construct auth service"),
        );

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(auth_service);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            store,
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Seed an account the way the external registration process would.
    pub fn seed_user(&self, email: &str, password: &str) -> Uuid {
        let password_hash = authkit::PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");
        let id = Uuid::new_v4();
        self.store.insert(UserRecord {
            id,
            email: email.trim().to_lowercase(),
            password_hash,
            refresh_token_hash: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
        });
        id
    }
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub refresh_token_hash: Option<String>,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// In-memory `UserStore` with the same compare-and-swap semantics the
/// Postgres implementation gets from conditional UPDATEs. A single lock per
/// operation keeps each read-modify-write atomic.
pub struct InMemoryUserStore {
    users: Mutex<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, record: UserRecord) {
        self.users.lock().unwrap().insert(record.id, record);
    }

    /// Backdate a pending reset so expiry paths can be exercised.
    pub fn expire_pending_reset(&self, email: &str) {
        let mut users = self.users.lock().unwrap();
        let record = users
            .values_mut()
            .find(|r| r.email == email)
            .expect("no such user");
        assert!(record.reset_token_hash.is_some(), "no pending reset");
        record.reset_token_expires_at = Some(Utc::now() - Duration::minutes(5));
    }
}

fn domain_email(email: &str) -> Result<EmailAddress, StoreError> {
    EmailAddress::new(email).map_err(|e| StoreError::Database(e.to_string()))
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credentials>, StoreError> {
        let users = self.users.lock().unwrap();
        users
            .values()
            .find(|r| r.email == email.as_str())
            .map(|r| {
                Ok(Credentials {
                    user_id: UserId(r.id),
                    email: domain_email(&r.email)?,
                    password_hash: r.password_hash.clone(),
                })
            })
            .transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        users
            .values()
            .find(|r| r.email == email.as_str())
            .map(|r| {
                Ok(User {
                    id: UserId(r.id),
                    email: domain_email(&r.email)?,
                    created_at: r.created_at,
                })
            })
            .transpose()
    }

    async fn find_by_refresh_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        users
            .values()
            .find(|r| r.refresh_token_hash.as_deref() == Some(token_hash))
            .map(|r| {
                Ok(User {
                    id: UserId(r.id),
                    email: domain_email(&r.email)?,
                    created_at: r.created_at,
                })
            })
            .transpose()
    }

    async fn find_pending_reset_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PendingReset>, StoreError> {
        let users = self.users.lock().unwrap();
        users
            .values()
            .find(|r| {
                r.reset_token_hash.as_deref() == Some(token_hash)
                    && r.reset_token_expires_at.is_some()
            })
            .map(|r| {
                Ok(PendingReset {
                    user_id: UserId(r.id),
                    email: domain_email(&r.email)?,
                    expires_at: r.reset_token_expires_at.expect("checked above"),
                })
            })
            .transpose()
    }

    async fn set_refresh_token_hash(
        &self,
        id: &UserId,
        token_hash: &str,
    ) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(&id.0)
            .ok_or_else(|| StoreError::Database(format!("no user {}", id)))?;
        record.refresh_token_hash = Some(token_hash.to_string());
        Ok(())
    }

    async fn rotate_refresh_token_hash(
        &self,
        id: &UserId,
        current_hash: &str,
        next_hash: &str,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(&id.0)
            .ok_or_else(|| StoreError::Database(format!("no user {}", id)))?;
        if record.refresh_token_hash.as_deref() != Some(current_hash) {
            return Ok(false);
        }
        record.refresh_token_hash = Some(next_hash.to_string());
        Ok(true)
    }

    async fn store_reset_token(
        &self,
        id: &UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(&id.0)
            .ok_or_else(|| StoreError::Database(format!("no user {}", id)))?;
        record.reset_token_hash = Some(token_hash.to_string());
        record.reset_token_expires_at = Some(expires_at);
        Ok(())
    }

    async fn complete_password_reset(
        &self,
        id: &UserId,
        reset_token_hash: &str,
        new_password_hash: &str,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(&id.0)
            .ok_or_else(|| StoreError::Database(format!("no user {}", id)))?;
        if record.reset_token_hash.as_deref() != Some(reset_token_hash) {
            return Ok(false);
        }
        record.password_hash = new_password_hash.to_string();
        record.reset_token_hash = None;
        record.reset_token_expires_at = None;
        Ok(true)
    }
}
