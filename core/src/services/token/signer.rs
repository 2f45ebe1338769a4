//! HS256 signing and verification shared by every token manager variant

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

/// Holds the shared secret's keys and the validation rules.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &Algorithm::HS256)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from the shared secret
    ///
    /// # Returns
    ///
    /// * `Ok(TokenSigner)` - Signer ready for use
    /// * `Err(DomainError::Configuration)` - The secret is empty
    pub fn new(secret: &str) -> Result<Self, DomainError> {
        if secret.trim().is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT signing secret is not configured".to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is exact: no clock-skew allowance
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Signs claims for `user_id`/`username` valid for `ttl` from `now`
    pub fn issue(
        &self,
        user_id: u64,
        username: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<(String, Claims), DomainError> {
        let claims = Claims::new(user_id, username, ttl, now);
        let token = self.encode(&claims)?;
        Ok((token, claims))
    }

    /// Encodes claims into a JWT
    pub fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies signature and expiry and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid and expiry strictly in the future
    /// * `Err(TokenError::TokenExpired)` - Signature valid, expiry passed
    /// * `Err(TokenError::InvalidToken)` - Anything else
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            })?;

        // The library accepts exp == now; a token must expire strictly in the future
        if token_data.claims.is_expired_at(now) {
            return Err(TokenError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}
