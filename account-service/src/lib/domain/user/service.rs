use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::AuthError;
use crate::domain::run_blocking;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::RepositoryError;
use crate::user::ports::CredentialServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for credential operations.
///
/// Concrete implementation of CredentialServicePort with dependency injection.
pub struct CredentialService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> CredentialService<UR>
where
    UR: UserRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> CredentialServicePort for CredentialService<UR>
where
    UR: UserRepository,
{
    async fn create(&self, command: CreateUserCommand) -> Result<UserId, AuthError> {
        let hasher = self.password_hasher;
        let password = command.password;
        let password_hash = run_blocking(move || hasher.hash(&password)).await??;

        let user = User::new(UserId::new(), command.email, password_hash);
        let user_id = user.id;

        self.repository.create(user).await.map_err(|e| {
            if !matches!(e, RepositoryError::AlreadyExists(_)) {
                tracing::error!(user_id = %user_id, error = %e, "Failed to create user");
            }
            AuthError::from(e)
        })?;

        tracing::info!(user_id = %user_id, "User created");
        Ok(user_id)
    }

    async fn verify(&self, user_id: &UserId, password: &str) -> Result<bool, AuthError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to find user");
                AuthError::from(e)
            })?
            .ok_or(AuthError::UserNotFound)?;

        let hasher = self.password_hasher;
        let password = password.to_string();
        let is_valid = run_blocking(move || hasher.verify(&password, &user.password_hash)).await?;

        if !is_valid {
            tracing::info!(user_id = %user_id, "Password verification failed");
        }

        Ok(is_valid)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<(), RepositoryError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
            async fn update_refresh_fingerprint(&self, id: &UserId, fingerprint: String) -> Result<(), RepositoryError>;
        }
    }

    fn command() -> CreateUserCommand {
        CreateUserCommand::new(
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "secret123".to_string(),
        )
    }

    fn stored_user(password: &str) -> User {
        User::new(
            UserId::new(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            auth::PasswordHasher::new().hash(password).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "alice@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.refresh_fingerprint.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = CredentialService::new(Arc::new(repository));

        let result = service.create(command()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_user_stores_hash_not_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.password_hash != "secret123"
                    && auth::PasswordHasher::new().verify("secret123", &user.password_hash)
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = CredentialService::new(Arc::new(repository));
        assert!(service.create(command()).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(RepositoryError::AlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = CredentialService::new(Arc::new(repository));

        let result = service.create(command()).await;
        assert_eq!(result.unwrap_err(), AuthError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_create_user_database_error_propagates() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(RepositoryError::Database("disk full".to_string())));

        let service = CredentialService::new(Arc::new(repository));

        let result = service.create(command()).await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::Repository(RepositoryError::Database("disk full".to_string()))
        );
    }

    #[tokio::test]
    async fn test_verify_correct_password() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("secret123");
        let user_id = user.id;

        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = CredentialService::new(Arc::new(repository));

        assert_eq!(service.verify(&user_id, "secret123").await, Ok(true));
    }

    #[tokio::test]
    async fn test_verify_wrong_password_is_false_not_error() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("secret123");
        let user_id = user.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = CredentialService::new(Arc::new(repository));

        assert_eq!(service.verify(&user_id, "secret124").await, Ok(false));
    }

    #[tokio::test]
    async fn test_verify_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = CredentialService::new(Arc::new(repository));

        let result = service.verify(&UserId::new(), "secret123").await;
        assert_eq!(result.unwrap_err(), AuthError::UserNotFound);
    }

    #[tokio::test]
    async fn test_verify_database_error_propagates() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(RepositoryError::Database("timeout".to_string())));

        let service = CredentialService::new(Arc::new(repository));

        let result = service.verify(&UserId::new(), "secret123").await;
        assert!(matches!(result, Err(AuthError::Repository(_))));
    }
}
