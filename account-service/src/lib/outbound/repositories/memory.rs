use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::RepositoryError;

/// Process-local user store.
///
/// Backs the integration tests and local runs without Postgres. Email
/// uniqueness is enforced the same way the `users_email_key` constraint does.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        if users.contains_key(&user.id) {
            return Err(RepositoryError::AlreadyExists(user.id.to_string()));
        }

        users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn update_refresh_fingerprint(
        &self,
        id: &UserId,
        fingerprint: String,
    ) -> Result<(), RepositoryError> {
        match self.users.write().await.get_mut(id) {
            Some(user) => {
                user.refresh_fingerprint = Some(fingerprint);
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }
}
