//! `AuthUser` extractor: the identity the dispatcher attached to the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tadoku_entity::user::Identity;

use crate::dispatch::{AuthorizationError, SessionContext};

/// The authenticated caller.
///
/// Only meaningful on routes with a minimum role; on a public route an
/// anonymous caller is rejected with a bare 401.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    /// Returns the inner identity.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthorizationError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .and_then(|session| session.identity)
            .map(AuthUser)
            .ok_or(AuthorizationError::Unauthorized)
    }
}
