use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Token issuer and validator.
///
/// Signs [`Claims`] with HMAC SHA-256 under a symmetric secret and accepts
/// back only tokens carrying that exact algorithm.
///
/// # Operational Notes
/// - The secret is fixed for the lifetime of the process and must be shared by
///   nothing but the authority that issues tokens.
/// - Changing the secret, or running two authority processes with different
///   secrets, invalidates every token issued under the old one. There is no
///   fallback key; affected clients have to log in again.
/// - The secret should be at least 256 bits (32 bytes) for HS256.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        // Expiry is checked by `Claims::is_expired` so that the boundary second counts as expired.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for a user, expiring one hour from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: i64) -> Result<String, JwtError> {
        self.encode(&Claims::for_user(user_id))
    }

    /// Encode an explicit claim set into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Self::ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `Malformed` - Signature, algorithm or structure is invalid
    /// * `Expired` - Signature is valid but the expiry has passed
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token against an explicit Unix timestamp.
    ///
    /// The signature is verified before the expiry, so a forged token is
    /// reported as `Malformed` even when its claimed expiry is also past.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| JwtError::Malformed(e.to_string()))?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
