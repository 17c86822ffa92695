use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::token::errors::AddressError;
use crate::user::errors::RepositoryError;

/// Error kinds returned by the credential and token services.
///
/// The security-relevant kinds are stable so callers can apply distinct
/// policies. `CannotRefreshToken` covers every internal fault on the refresh
/// path; its cause is only ever written to the server log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid token")]
    InvalidToken,

    #[error("incorrect sign method")]
    IncorrectSignMethod,

    #[error("cannot parse token")]
    CannotParseToken,

    #[error("cannot refresh token")]
    CannotRefreshToken,

    #[error("refresh operation from another address")]
    AddressMismatch,

    #[error("invalid client address: {0}")]
    InvalidClientAddress(#[from] AddressError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token signing failed: {0}")]
    Token(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether the error stems from an internal fault rather than the request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::CannotRefreshToken
                | AuthError::Password(_)
                | AuthError::Token(_)
                | AuthError::Repository(_)
                | AuthError::Internal(_)
        )
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => AuthError::Token(msg),
            JwtError::IncorrectSignMethod(_) => AuthError::IncorrectSignMethod,
            JwtError::CannotParseToken(_) => AuthError::CannotParseToken,
            JwtError::TokenExpired | JwtError::MissingClaim(_) => AuthError::InvalidToken,
        }
    }
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(_) => AuthError::UserAlreadyExists,
            RepositoryError::NotFound(_) => AuthError::UserNotFound,
            RepositoryError::Database(_) => AuthError::Repository(err),
        }
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::PasswordError(e) => AuthError::Password(e),
            auth::AuthenticationError::JwtError(e) => AuthError::from(e),
        }
    }
}
