//! Mounts the route table behind the session guard.

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use tracing::debug;

use tadoku_auth::rbac::AccessPolicy;
use tadoku_core::error::AppError;

use super::guard::{RouteGuard, enforce_min_role};
use super::resolver::SessionResolver;
use super::route::Route;

/// Turns declared [`Route`]s into an axum [`Router`].
///
/// Every route gets the same treatment: resolve the session, check the
/// minimum role, then run the handler. No path is special-cased.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// Shared session resolver.
    resolver: Arc<SessionResolver>,
    /// Role policy.
    policy: AccessPolicy,
}

impl Dispatcher {
    /// Creates a new dispatcher.
    pub fn new(resolver: Arc<SessionResolver>, policy: AccessPolicy) -> Self {
        Self { resolver, policy }
    }

    /// Builds a router from the route table.
    ///
    /// Fails if the same method and path are declared twice.
    pub fn mount<S>(&self, routes: Vec<Route<S>>) -> Result<Router<S>, AppError>
    where
        S: Clone + Send + Sync + 'static,
    {
        let mut seen = HashSet::new();
        let mut router = Router::new();

        for route in routes {
            if !seen.insert((route.method.clone(), route.path.clone())) {
                return Err(AppError::configuration(format!(
                    "Route declared twice: {} {}",
                    route.method, route.path
                )));
            }

            debug!(
                method = %route.method,
                path = %route.path,
                min_role = ?route.min_role,
                "Mounting route"
            );

            let guard = RouteGuard {
                resolver: Arc::clone(&self.resolver),
                policy: self.policy,
                min_role: route.min_role,
            };
            let handler = route
                .handler
                .route_layer(from_fn_with_state(guard, enforce_min_role));

            router = router.route(&route.path, handler);
        }

        Ok(router)
    }
}
