use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Clock;
use auth::JwtError;
use auth::TokenClaims;
use auth::TokenUse;

use crate::domain::errors::AuthError;
use crate::domain::run_blocking;
use crate::domain::token::dispatcher::NotificationDispatcher;
use crate::domain::token::models::ClientAddress;
use crate::domain::token::models::TokenLifetimes;
use crate::domain::token::models::TokenPair;
use crate::domain::token::models::WarningMessage;
use crate::domain::token::ports::TokenServicePort;
use crate::domain::user::models::UserId;
use crate::user::errors::RepositoryError;
use crate::user::ports::UserRepository;

/// Domain service implementation for token issuance and rotation.
///
/// Holds no mutable state of its own: the signing key, clock and lifetimes are
/// fixed at construction and the only per-user state lives in the repository.
pub struct TokenService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
    notifier: NotificationDispatcher,
    lifetimes: TokenLifetimes,
}

impl<UR> TokenService<UR>
where
    UR: UserRepository,
{
    /// Create a new token service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User store holding refresh fingerprints
    /// * `authenticator` - Signing key and hashing primitives
    /// * `clock` - Time source for `iat`/`exp` and expiry checks
    /// * `notifier` - Detached channel for address-mismatch alerts
    /// * `lifetimes` - Access and refresh token lifetimes
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        clock: Arc<dyn Clock>,
        notifier: NotificationDispatcher,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            repository,
            authenticator,
            clock,
            notifier,
            lifetimes,
        }
    }

    /// Sign a pair bound to `address` and store its refresh fingerprint.
    ///
    /// The store write is the last step, so a caller that drops this future
    /// early never leaves a half-rotated fingerprint behind.
    async fn issue_for(
        &self,
        address: ClientAddress,
        user_id: &UserId,
    ) -> Result<TokenPair, AuthError> {
        let now = self.clock.now();
        let access = TokenClaims::new(
            user_id,
            address,
            TokenUse::Access,
            now,
            self.lifetimes.access(),
        );
        let refresh = TokenClaims::new(
            user_id,
            address,
            TokenUse::Refresh,
            now,
            self.lifetimes.refresh(),
        );

        let authenticator = Arc::clone(&self.authenticator);
        let issued = run_blocking(move || authenticator.issue(&access, &refresh))
            .await?
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to sign token pair");
                AuthError::from(e)
            })?;

        self.repository
            .update_refresh_fingerprint(user_id, issued.refresh_fingerprint)
            .await
            .map_err(|e| {
                if !matches!(e, RepositoryError::NotFound(_)) {
                    tracing::error!(
                        user_id = %user_id,
                        error = %e,
                        "Failed to store refresh fingerprint"
                    );
                }
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user_id, client_addr = %address, "Token pair issued");

        Ok(TokenPair {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
        })
    }
}

#[async_trait]
impl<UR> TokenServicePort for TokenService<UR>
where
    UR: UserRepository,
{
    async fn issue_tokens(
        &self,
        client_addr: &str,
        user_id: &UserId,
    ) -> Result<TokenPair, AuthError> {
        let address = ClientAddress::parse(client_addr).map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Cannot parse client address");
            AuthError::from(e)
        })?;

        self.issue_for(address, user_id).await
    }

    async fn refresh_token(
        &self,
        client_addr: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, AuthError> {
        let now = self.clock.now();

        let claims = self
            .authenticator
            .validate_token(refresh_token, now.timestamp())
            .map_err(|e| match e {
                JwtError::CannotParseToken(reason) => {
                    tracing::warn!(reason = %reason, "Refresh with unparseable token");
                    AuthError::CannotRefreshToken
                }
                other => AuthError::from(other),
            })?;
        if claims.token_use != TokenUse::Refresh {
            tracing::warn!(user_id = %claims.user_id, "Refresh with an access token");
            return Err(AuthError::InvalidToken);
        }
        let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
            tracing::warn!(error = %e, "Refresh token carries a malformed user id");
            AuthError::InvalidToken
        })?;

        let user = match self.repository.find_by_id(&user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AuthError::UserNotFound),
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to find user");
                return Err(AuthError::CannotRefreshToken);
            }
        };

        // Rotation overwrites the fingerprint, so a replayed token lands here too
        let Some(stored_fingerprint) = user.refresh_fingerprint else {
            return Err(AuthError::InvalidToken);
        };
        let authenticator = Arc::clone(&self.authenticator);
        let presented = refresh_token.to_string();
        let is_current = run_blocking(move || {
            authenticator.verify_refresh_token(&presented, &stored_fingerprint)
        })
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Fingerprint check aborted");
            AuthError::CannotRefreshToken
        })?;
        if !is_current {
            tracing::warn!(user_id = %user_id, "Refresh with a stale or unknown token");
            return Err(AuthError::InvalidToken);
        }

        let address = ClientAddress::parse(client_addr).map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Cannot parse client address");
            AuthError::CannotRefreshToken
        })?;

        if address.to_string() != claims.client_addr {
            tracing::warn!(
                user_id = %user_id,
                bound_addr = %claims.client_addr,
                client_addr = %address,
                "Refresh from an unexpected address"
            );
            self.notifier.dispatch(
                user.email.as_str(),
                WarningMessage::suspicious_refresh(now, &address),
            );
            return Err(AuthError::AddressMismatch);
        }

        self.issue_for(address, &user_id).await.map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to rotate token pair");
            AuthError::CannotRefreshToken
        })
    }

    async fn authenticate(&self, access_token: &str) -> Result<TokenClaims, AuthError> {
        let claims = self
            .authenticator
            .validate_token(access_token, self.clock.now().timestamp())?;

        if claims.token_use != TokenUse::Access {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
