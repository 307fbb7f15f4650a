//! The per-route authorization step.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::debug;

use tadoku_auth::rbac::AccessPolicy;
use tadoku_entity::user::UserRole;

use super::context::SessionContext;
use super::resolver::SessionResolver;

/// Why a request was stopped before its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// No usable identity and the route requires a role.
    #[error("authentication required")]
    Unauthorized,
    /// Valid identity whose role is below the route's minimum.
    #[error("insufficient role")]
    Forbidden,
}

impl AuthorizationError {
    /// HTTP status for this outcome.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        // Empty body: nothing about the token or the role leaks to the client.
        self.status().into_response()
    }
}

/// Checks a resolved session against a route's minimum role.
pub fn authorize(
    policy: &AccessPolicy,
    session: &SessionContext,
    min_role: Option<UserRole>,
) -> Result<(), AuthorizationError> {
    if policy.satisfies(session.role(), min_role) {
        return Ok(());
    }

    if session.is_authenticated() {
        Err(AuthorizationError::Forbidden)
    } else {
        Err(AuthorizationError::Unauthorized)
    }
}

/// State for one mounted route's guard.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    /// Shared session resolver.
    pub resolver: Arc<SessionResolver>,
    /// Role policy.
    pub policy: AccessPolicy,
    /// The route's minimum role; `None` means public.
    pub min_role: Option<UserRole>,
}

/// Middleware wrapped around every declared route.
pub async fn enforce_min_role(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = guard.resolver.resolve(request.headers());

    if let Err(denied) = authorize(&guard.policy, &session, guard.min_role) {
        debug!(
            method = %request.method(),
            path = %request.uri().path(),
            min_role = ?guard.min_role,
            outcome = %denied,
            "Request rejected before handler"
        );
        return denied.into_response();
    }

    request.extensions_mut().insert(session);
    next.run(request).await
}
