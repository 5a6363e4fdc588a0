use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::errors::StoreError;
use crate::auth::models::Credentials;
use crate::auth::models::EmailAddress;
use crate::auth::models::PendingReset;
use crate::auth::models::User;
use crate::auth::models::UserId;
use crate::auth::ports::UserStore;

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Queries are bound at runtime so the crate builds without a reachable
// database; the row structs below pin the projections.

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: Uuid,
    email: String,
    password_hash: String,
}

#[derive(sqlx::FromRow)]
struct PendingResetRow {
    id: Uuid,
    email: String,
    reset_token_expires_at: DateTime<Utc>,
}

fn stored_email(email: String) -> Result<EmailAddress, StoreError> {
    EmailAddress::new(email).map_err(|e| StoreError::Database(format!("stored email invalid: {}", e)))
}

impl UserRow {
    fn into_user(self) -> Result<User, StoreError> {
        Ok(User {
            id: UserId(self.id),
            email: stored_email(self.email)?,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credentials>, StoreError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Credentials {
                user_id: UserId(r.id),
                email: stored_email(r.email)?,
                password_hash: r.password_hash,
            })),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_refresh_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, created_at
            FROM users
            WHERE refresh_token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_pending_reset_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PendingReset>, StoreError> {
        let row = sqlx::query_as::<_, PendingResetRow>(
            r#"
            SELECT id, email, reset_token_expires_at
            FROM users
            WHERE reset_token_hash = $1
              AND reset_token_expires_at IS NOT NULL
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(PendingReset {
                user_id: UserId(r.id),
                email: stored_email(r.email)?,
                expires_at: r.reset_token_expires_at,
            })),
            None => Ok(None),
        }
    }

    async fn set_refresh_token_hash(
        &self,
        id: &UserId,
        token_hash: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Database(format!(
                "user {} vanished during refresh-token rotation",
                id
            )));
        }

        Ok(())
    }

    async fn rotate_refresh_token_hash(
        &self,
        id: &UserId,
        current_hash: &str,
        next_hash: &str,
    ) -> Result<bool, StoreError> {
        // Conditioned on the stored digest so two exchanges racing on the
        // same token cannot both win.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = $3
            WHERE id = $1 AND refresh_token_hash = $2
            "#,
        )
        .bind(id.0)
        .bind(current_hash)
        .bind(next_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn store_reset_token(
        &self,
        id: &UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET reset_token_hash = $2, reset_token_expires_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Database(format!(
                "user {} vanished while storing reset token",
                id
            )));
        }

        Ok(())
    }

    async fn complete_password_reset(
        &self,
        id: &UserId,
        reset_token_hash: &str,
        new_password_hash: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $3, reset_token_hash = NULL, reset_token_expires_at = NULL
            WHERE id = $1 AND reset_token_hash = $2
            "#,
        )
        .bind(id.0)
        .bind(reset_token_hash)
        .bind(new_password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
