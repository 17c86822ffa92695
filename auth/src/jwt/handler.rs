use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::RawClaims;
use super::claims::TokenClaims;
use super::errors::JwtError;

/// Algorithms accepted when decoding. Anything else is rejected before the
/// signature is checked.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

fn is_hmac(algorithm: Algorithm) -> bool {
    HMAC_ALGORITHMS.contains(&algorithm)
}

/// JWT token handler for encoding and decoding tokens.
///
/// Signs with a single server-side secret using an HMAC algorithm (HS512 by
/// default) and refuses tokens declaring any other algorithm family.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS512 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 512 bits (64 bytes) for HS512
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
        }
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    /// * `now` - Current Unix timestamp used for the expiry check
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `IncorrectSignMethod` - Header declares a non-HMAC algorithm
    /// * `CannotParseToken` - Token is malformed or the signature does not verify
    /// * `MissingClaim` - Signature is valid but a required claim is absent
    /// * `TokenExpired` - Signature is valid but `now` is at or past `exp`
    pub fn decode(&self, token: &str, now: i64) -> Result<TokenClaims, JwtError> {
        let header =
            decode_header(token).map_err(|e| JwtError::CannotParseToken(e.to_string()))?;
        if !is_hmac(header.alg) {
            return Err(JwtError::IncorrectSignMethod(format!("{:?}", header.alg)));
        }

        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // Presence and expiry are checked below against the caller's clock
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let token_data =
            decode::<RawClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidAlgorithm => {
                        JwtError::IncorrectSignMethod(format!("{:?}", header.alg))
                    }
                    _ => JwtError::CannotParseToken(e.to_string()),
                }
            })?;

        let claims = TokenClaims::try_from(token_data.claims)?;
        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
