//! Session token transport: a single `Secure`, `HttpOnly` cookie.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use tadoku_core::config::AuthConfig;

/// Reads and writes the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    /// Cookie name.
    name: String,
    /// Whether to set the `Secure` attribute.
    secure: bool,
}

impl SessionCookie {
    /// Creates the cookie settings from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: config.cookie_secure,
        }
    }

    /// Cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the token carried by the request, if any.
    ///
    /// An empty cookie value counts as absent.
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        CookieJar::from_headers(headers)
            .get(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Adds the session cookie carrying `token` to `jar`.
    pub fn issue(&self, jar: CookieJar, token: String) -> CookieJar {
        let cookie = Cookie::build((self.name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax);
        jar.add(cookie)
    }

    /// Adds a removal cookie for the session to `jar`.
    ///
    /// Always emits the removal, even when the request carried no cookie.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = Cookie::build((self.name.clone(), ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build();
        cookie.make_removal();
        jar.add(cookie)
    }
}
