//! Authentication utilities library
//!
//! Provides the credential primitives the account service is built on:
//! - Password hashing (Argon2id)
//! - Refresh token fingerprints (SHA-256 digest, then Argon2id)
//! - HMAC-signed JWT generation and validation with algorithm-family checks
//! - A substitutable clock
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Authenticator, TokenClaims, TokenUse};
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_64_bytes_long_for_the_hs512_signing_alg!!!!");
//! let now = Utc::now();
//! let access = TokenClaims::new("user123", "203.0.113.5", TokenUse::Access, now, Duration::minutes(15));
//! let refresh = TokenClaims::new("user123", "203.0.113.5", TokenUse::Refresh, now, Duration::days(7));
//!
//! let issued = auth.issue(&access, &refresh).unwrap();
//! assert!(auth.verify_refresh_token(&issued.refresh_token, &issued.refresh_fingerprint));
//!
//! let decoded = auth.validate_token(&issued.access_token, now.timestamp()).unwrap();
//! assert_eq!(decoded.user_id, "user123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod fingerprint;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedTokens;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenUse;
pub use password::PasswordError;
pub use password::PasswordHasher;
