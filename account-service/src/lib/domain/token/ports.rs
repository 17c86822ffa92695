use async_trait::async_trait;
use auth::TokenClaims;

use crate::domain::errors::AuthError;
use crate::domain::token::models::TokenPair;
use crate::domain::token::models::WarningMessage;
use crate::domain::user::models::UserId;
use crate::token::errors::NotificationError;

/// Port for token lifecycle operations.
#[async_trait]
pub trait TokenServicePort: Send + Sync + 'static {
    /// Issue a new token pair bound to the requesting address.
    ///
    /// Overwrites the user's stored refresh fingerprint, which invalidates any
    /// refresh token issued before.
    ///
    /// # Arguments
    /// * `client_addr` - Peer address as `ip:port`
    /// * `user_id` - Owner of the tokens
    ///
    /// # Errors
    /// * `InvalidClientAddress` - `client_addr` is not `ip:port`
    /// * `UserNotFound` - No user with this ID
    /// * `Repository` - Storage failed
    async fn issue_tokens(&self, client_addr: &str, user_id: &UserId)
        -> Result<TokenPair, AuthError>;

    /// Rotate a refresh token into a brand-new pair.
    ///
    /// # Errors
    /// * `CannotRefreshToken` - Token unparseable or an internal fault occurred
    /// * `IncorrectSignMethod` - Token declares a non-HMAC algorithm
    /// * `InvalidToken` - Expired, wrong purpose, or not the current refresh token
    /// * `UserNotFound` - Token owner no longer exists
    /// * `AddressMismatch` - Requested from a different address than issued to
    async fn refresh_token(
        &self,
        client_addr: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, AuthError>;

    /// Validate an access token.
    ///
    /// # Errors
    /// * `CannotParseToken` - Token is malformed or badly signed
    /// * `IncorrectSignMethod` - Token declares a non-HMAC algorithm
    /// * `InvalidToken` - Expired or not an access token
    async fn authenticate(&self, access_token: &str) -> Result<TokenClaims, AuthError>;
}

/// Outbound channel for alerts to account owners.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    /// Deliver `message` to `destination`.
    ///
    /// # Errors
    /// * `DeliveryFailed` - The channel rejected the message
    async fn notify(
        &self,
        destination: &str,
        message: &WarningMessage,
    ) -> Result<(), NotificationError>;
}
