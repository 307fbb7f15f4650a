//! Session token creation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use tadoku_core::config::AuthConfig;
use tadoku_core::traits::Clock;

use super::claims::{Claims, SessionClaims};
use super::error::TokenError;

/// Creates signed, time-bounded session tokens (HS256).
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Time source for `iat`/`exp`.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("clock", &self.clock)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self::from_secret(config.jwt_secret.as_bytes(), clock)
    }

    /// Creates a new encoder from a raw secret.
    pub fn from_secret(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            clock,
        }
    }

    /// Signs `session` into a token valid for `ttl` from now.
    ///
    /// Returns the token and its expiry. The expiry is truncated to whole
    /// seconds, matching what the token itself carries.
    pub fn encode(
        &self,
        ttl: Duration,
        session: &SessionClaims,
    ) -> Result<(String, DateTime<Utc>), TokenError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding(format!("session ttl out of range: {ttl}")))?;
        let claims = Claims::new(session.clone(), now, expires_at);

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok((token, claims.expires_at()))
    }
}
