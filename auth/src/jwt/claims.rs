use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Intended use of a signed token.
///
/// Access and refresh tokens share the same claim layout, so the purpose is
/// carried explicitly to keep one from being accepted in place of the other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

impl fmt::Display for TokenUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenUse::Access => f.write_str("access"),
            TokenUse::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims carried by every token the service issues.
///
/// `client_addr` is the normalized IP of the peer the token was issued to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Owner of the token
    pub user_id: String,

    /// IP address the token is bound to
    pub client_addr: String,

    /// Access or refresh
    pub token_use: TokenUse,

    /// Unique token identifier
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims issued at `issued_at` and valid for `ttl`.
    ///
    /// An expiry past the representable range saturates at `DateTime::MAX_UTC`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `client_addr` - Normalized IP the token is bound to
    /// * `token_use` - Intended use of the token
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn new(
        user_id: impl ToString,
        client_addr: impl ToString,
        token_use: TokenUse,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            client_addr: client_addr.to_string(),
            token_use,
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
                .timestamp(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is valid strictly before its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

/// Wire form of the claims, used while decoding.
///
/// Every field is optional so a verified token with missing claims is
/// reported as invalid rather than unparseable.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    client_addr: Option<String>,
    #[serde(default)]
    token_use: Option<TokenUse>,
    #[serde(default)]
    jti: Option<String>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

impl TryFrom<RawClaims> for TokenClaims {
    type Error = JwtError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: raw
                .user_id
                .ok_or_else(|| JwtError::MissingClaim("user_id".to_string()))?,
            client_addr: raw
                .client_addr
                .ok_or_else(|| JwtError::MissingClaim("client_addr".to_string()))?,
            token_use: raw
                .token_use
                .ok_or_else(|| JwtError::MissingClaim("token_use".to_string()))?,
            jti: raw
                .jti
                .ok_or_else(|| JwtError::MissingClaim("jti".to_string()))?,
            iat: raw
                .iat
                .ok_or_else(|| JwtError::MissingClaim("iat".to_string()))?,
            exp: raw
                .exp
                .ok_or_else(|| JwtError::MissingClaim("exp".to_string()))?,
        })
    }
}
