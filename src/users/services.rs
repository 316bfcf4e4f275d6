use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::StatusPolicy;
use crate::error::{AppError, AppResult};
use crate::users::repo::{StoreError, UserStore};
use crate::users::repo_types::{NewUser, User};

/// Register, login check and profile lookup on top of a [`UserStore`].
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
    status_policy: StatusPolicy,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, status_policy: StatusPolicy) -> Self {
        Self {
            store,
            status_policy,
        }
    }

    pub async fn register(&self, mut draft: NewUser) -> AppResult<User> {
        draft.name = draft.name.trim().to_string();
        draft.email = draft.email.trim().to_string();
        draft.username = draft.username.trim().to_string();

        if draft.name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if draft.username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if draft.password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }
        if draft.email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }

        let user = self.store.create_user(draft).await.map_err(|e| match e {
            StoreError::DuplicateUsername => {
                AppError::Conflict(StoreError::DuplicateUsername.to_string())
            }
            other => other.into(),
        })?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub async fn check_login(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .store
            .find_by_credentials(username, password)
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "login rejected: no matching credentials");
                AppError::InvalidCredentials
            })?;

        if !self.status_policy.allows(user.status) {
            warn!(
                user_id = %user.id,
                status = user.status,
                policy = ?self.status_policy,
                "login rejected by status policy"
            );
            return Err(AppError::InvalidCredentials);
        }

        info!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    pub async fn get_current_user(&self, id: Uuid) -> AppResult<User> {
        self.store
            .find_current_user(id)
            .await?
            .ok_or(AppError::NotFound)
    }
}
