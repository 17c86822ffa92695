use async_trait::async_trait;

use crate::domain::errors::AuthError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::RepositoryError;

/// Port for credential operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Repository` - Storage failed
    async fn create(&self, command: CreateUserCommand) -> Result<UserId, AuthError>;

    /// Check a user's password.
    ///
    /// A wrong password is `Ok(false)`, never an error.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this ID
    /// * `Repository` - Storage failed
    async fn verify(&self, user_id: &UserId, password: &str) -> Result<bool, AuthError>;
}

/// Persistence operations for the user store.
///
/// Implementations must make each call atomic per user row; no ordering is
/// assumed across calls.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Database` - Database operation failed
    async fn create(&self, user: User) -> Result<(), RepositoryError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Overwrite the stored refresh token fingerprint.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Database` - Database operation failed
    async fn update_refresh_fingerprint(
        &self,
        id: &UserId,
        fingerprint: String,
    ) -> Result<(), RepositoryError>;
}
