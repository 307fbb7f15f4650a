//! Turns a request's headers into a [`SessionContext`].

use std::sync::Arc;

use axum::http::HeaderMap;
use tracing::debug;

use tadoku_auth::jwt::JwtDecoder;

use super::context::SessionContext;
use super::cookie::SessionCookie;

/// Extracts and decodes the session token.
///
/// Never fails: a missing, expired, tampered, or unreadable token all
/// resolve to an anonymous caller, so clients cannot tell a nearly valid
/// token from no token at all.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    /// Token transport.
    cookie: SessionCookie,
    /// Token validation.
    decoder: Arc<JwtDecoder>,
}

impl SessionResolver {
    /// Creates a new resolver.
    pub fn new(cookie: SessionCookie, decoder: Arc<JwtDecoder>) -> Self {
        Self { cookie, decoder }
    }

    /// Resolves the caller for a request.
    pub fn resolve(&self, headers: &HeaderMap) -> SessionContext {
        let Some(token) = self.cookie.token_from_headers(headers) else {
            return SessionContext::anonymous();
        };

        match self.decoder.decode(&token) {
            Ok(claims) => SessionContext::from(claims.into_session()),
            Err(reason) => {
                debug!(%reason, "Ignoring unusable session token");
                SessionContext::anonymous()
            }
        }
    }
}
