//! The request-scoped session capability handed to handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde_json::{Map, Value};

use tadoku_auth::jwt::SessionClaims;
use tadoku_entity::user::{Identity, UserRole};

/// Who is calling, as resolved by the dispatcher.
///
/// Inserted into the request extensions before the handler runs. A request
/// that never went through the dispatcher extracts as anonymous.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    /// The authenticated identity, `None` for anonymous callers.
    pub identity: Option<Identity>,
    /// Extension data carried in the session token.
    pub data: Map<String, Value>,
}

impl SessionContext {
    /// An anonymous caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Role of the caller, if authenticated.
    pub fn role(&self) -> Option<UserRole> {
        self.identity.map(|identity| identity.role)
    }

    /// Whether the caller presented a valid token with an identity.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

impl From<SessionClaims> for SessionContext {
    fn from(claims: SessionClaims) -> Self {
        Self {
            identity: claims.user,
            data: claims.data,
        }
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_default())
    }
}
