//! Declared routes: method, path, handler, minimum role.

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{MethodFilter, MethodRouter, on};

use tadoku_core::error::AppError;
use tadoku_entity::user::UserRole;

use crate::state::AppState;

/// One entry of the route table.
///
/// Built once at startup and handed to the [`Dispatcher`](super::Dispatcher),
/// which wraps every entry with the same guard.
#[derive(Debug)]
pub struct Route<S = AppState> {
    /// HTTP method.
    pub method: Method,
    /// Path pattern in axum syntax, e.g. `/users/{id}/role`.
    pub path: String,
    /// The handler, already bound to its method.
    pub handler: MethodRouter<S>,
    /// Lowest role that may reach the handler; `None` means public.
    pub min_role: Option<UserRole>,
}

impl<S> Route<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Declares a public route for an arbitrary method.
    pub fn new<H, T>(method: Method, path: impl Into<String>, handler: H) -> Result<Self, AppError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let filter = MethodFilter::try_from(method.clone()).map_err(|_| {
            AppError::configuration(format!("Unsupported HTTP method for route: {method}"))
        })?;

        Ok(Self::with_filter(method, filter, path, handler))
    }

    /// Declares a public `GET` route.
    pub fn get<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self::with_filter(Method::GET, MethodFilter::GET, path, handler)
    }

    /// Declares a public `POST` route.
    pub fn post<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self::with_filter(Method::POST, MethodFilter::POST, path, handler)
    }

    /// Declares a public `PUT` route.
    pub fn put<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self::with_filter(Method::PUT, MethodFilter::PUT, path, handler)
    }

    /// Declares a public `PATCH` route.
    pub fn patch<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self::with_filter(Method::PATCH, MethodFilter::PATCH, path, handler)
    }

    /// Declares a public `DELETE` route.
    pub fn delete<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self::with_filter(Method::DELETE, MethodFilter::DELETE, path, handler)
    }

    /// Sets the minimum role for this route.
    pub fn min_role(mut self, role: UserRole) -> Self {
        self.min_role = Some(role);
        self
    }

    /// Whether anyone may reach the handler.
    pub fn is_public(&self) -> bool {
        self.min_role.is_none()
    }

    fn with_filter<H, T>(
        method: Method,
        filter: MethodFilter,
        path: impl Into<String>,
        handler: H,
    ) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        Self {
            method,
            path: path.into(),
            handler: on(filter, handler),
            min_role: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop() {}

    #[test]
    fn test_builders() {
        let route: Route<()> = Route::get("/ping", noop);
        assert_eq!(route.method, Method::GET);
        assert_eq!(route.path, "/ping");
        assert!(route.is_public());

        let route: Route<()> = Route::delete("/sessions", noop).min_role(UserRole::User);
        assert_eq!(route.method, Method::DELETE);
        assert_eq!(route.min_role, Some(UserRole::User));
        assert!(!route.is_public());
    }

    #[test]
    fn test_new_accepts_standard_methods() {
        let route: Route<()> = Route::new(Method::OPTIONS, "/things", noop).unwrap();
        assert_eq!(route.method, Method::OPTIONS);
    }

    #[test]
    fn test_new_rejects_extension_methods() {
        let method = Method::from_bytes(b"PURGE").unwrap();
        let result: Result<Route<()>, _> = Route::new(method, "/things", noop);
        assert!(result.is_err());
    }
}
