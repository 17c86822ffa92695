use crate::fingerprint;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing, refresh token
/// fingerprinting and JWT handling.
///
/// Holds the signing key for the lifetime of the process. Every method is
/// synchronous; the hashing ones are CPU heavy and async callers should run
/// them on a blocking pool.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// A freshly signed token pair and the fingerprint to store for it.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_fingerprint: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator signing with HS512.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_handler(JwtHandler::new(jwt_secret))
    }

    /// Create an authenticator around an existing JWT handler.
    pub fn with_handler(jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against its stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Sign an access/refresh pair and fingerprint the refresh token.
    ///
    /// # Arguments
    /// * `access` - Claims for the access token
    /// * `refresh` - Claims for the refresh token
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    /// * `PasswordError` - Fingerprint hashing failed
    pub fn issue(
        &self,
        access: &TokenClaims,
        refresh: &TokenClaims,
    ) -> Result<IssuedTokens, AuthenticationError> {
        let access_token = self.jwt_handler.encode(access)?;
        let refresh_token = self.jwt_handler.encode(refresh)?;
        let refresh_fingerprint = fingerprint::fingerprint(&self.password_hasher, &refresh_token)?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            refresh_fingerprint,
        })
    }

    /// Check a presented refresh token against the stored fingerprint.
    pub fn verify_refresh_token(&self, refresh_token: &str, stored_fingerprint: &str) -> bool {
        fingerprint::matches(&self.password_hasher, refresh_token, stored_fingerprint)
    }

    /// Validate and decode JWT token.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    /// * `now` - Current Unix timestamp
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str, now: i64) -> Result<TokenClaims, JwtError> {
        self.jwt_handler.decode(token, now)
    }
}
