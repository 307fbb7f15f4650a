//! Role-gated request dispatch.
//!
//! Per request: extract the session cookie, decode it (any failure means
//! anonymous), compare the resolved role with the route's minimum role, then
//! either run the handler with a [`SessionContext`] attached or answer a bare
//! 401/403.

pub mod context;
pub mod cookie;
pub mod dispatcher;
pub mod guard;
pub mod resolver;
pub mod route;

pub use context::SessionContext;
pub use cookie::SessionCookie;
pub use dispatcher::Dispatcher;
pub use guard::{AuthorizationError, authorize};
pub use resolver::SessionResolver;
pub use route::Route;
