//! Refresh token fingerprints.
//!
//! Only a slow hash of a token's SHA-256 digest is ever stored, never the
//! token itself. The digest keeps the hashed input short and fixed-length no
//! matter how many claims the token carries.

use sha2::Digest;
use sha2::Sha256;

use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Hex-encoded SHA-256 digest of a token.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Produce the storable fingerprint of a refresh token.
///
/// # Errors
/// * `HashingFailed` - Hashing operation failed
pub fn fingerprint(hasher: &PasswordHasher, token: &str) -> Result<String, PasswordError> {
    hasher.hash(&token_digest(token))
}

/// Check a presented token against a stored fingerprint.
pub fn matches(hasher: &PasswordHasher, token: &str, stored: &str) -> bool {
    hasher.verify(&token_digest(token), stored)
}
