use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::users::repo_types::{NewUser, User};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("username already taken")]
    DuplicateUsername,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Password(String),
}

/// Persistence of user records. Password comparison lives behind this
/// boundary, so callers only ever hand over plaintext credentials.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Hash the draft's password and persist the user.
    async fn create_user(&self, draft: NewUser) -> Result<User, StoreError>;

    /// Return the user whose username and password both match.
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Return the user behind an already authenticated identity.
    async fn find_current_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// Checks `password` against the stored hash of `user`, if any.
pub(crate) fn match_password(
    user: Option<User>,
    password: &str,
) -> Result<Option<User>, StoreError> {
    let Some(user) = user else {
        return Ok(None);
    };
    let ok = verify_password(password, &user.password_hash)
        .map_err(|e| StoreError::Password(e.to_string()))?;
    Ok(ok.then_some(user))
}

pub(crate) fn hash_draft_password(draft: &NewUser) -> Result<String, StoreError> {
    hash_password(&draft.password).map_err(|e| StoreError::Password(e.to_string()))
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, username, password_hash, status, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, draft: NewUser) -> Result<User, StoreError> {
        let hash = hash_draft_password(&draft)?;
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, username, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, username, password_hash, status, created_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.username)
        .bind(&hash)
        .fetch_one(&self.db)
        .await;

        match inserted {
            Ok(user) => {
                debug!(user_id = %user.id, "user row inserted");
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = self.find_by_username(username).await?;
        match_password(user, password)
    }

    async fn find_current_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, username, password_hash, status, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}
