use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::users::repo::{hash_draft_password, match_password, StoreError, UserStore};
use crate::users::repo_types::{NewUser, User};

/// In-process user store for tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_status(&self, id: Uuid, status: bool) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.status = status;
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, draft: NewUser) -> Result<User, StoreError> {
        let password_hash = hash_draft_password(&draft)?;
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == draft.username) {
            return Err(StoreError::DuplicateUsername);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: draft.name,
            email: draft.email,
            username: draft.username,
            password_hash,
            status: false,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned();
        match_password(user, password)
    }

    async fn find_current_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(username: &str, password: &str) -> NewUser {
        NewUser {
            name: "A".into(),
            email: "a@x.com".into(),
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn stores_hash_not_plaintext() {
        let store = MemoryUserStore::new();
        let user = store.create_user(draft("a1", "p")).await.unwrap();
        assert_ne!(user.password_hash, "p");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryUserStore::new();
        store.create_user(draft("a1", "p")).await.unwrap();
        let err = store.create_user(draft("a1", "other")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUsername));
    }

    #[tokio::test]
    async fn credential_lookup_requires_matching_password() {
        let store = MemoryUserStore::new();
        let created = store.create_user(draft("a1", "p")).await.unwrap();

        let found = store.find_by_credentials("a1", "p").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
        assert!(store.find_by_credentials("a1", "wrong").await.unwrap().is_none());
        assert!(store.find_by_credentials("nobody", "p").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn current_user_by_id() {
        let store = MemoryUserStore::new();
        let created = store.create_user(draft("a1", "p")).await.unwrap();
        let found = store.find_current_user(created.id).await.unwrap().unwrap();
        assert_eq!(found.username, "a1");
        assert!(store.find_current_user(Uuid::new_v4()).await.unwrap().is_none());
    }
}
