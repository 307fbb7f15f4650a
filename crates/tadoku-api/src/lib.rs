//! # tadoku-api
//!
//! HTTP API layer for the Tadoku contest API built on Axum.
//!
//! Every declared [`Route`](dispatch::Route) is mounted through the
//! role-gated [`Dispatcher`](dispatch::Dispatcher): the session cookie is
//! decoded, the caller's role is checked against the route's minimum role,
//! and only then does the handler run.

pub mod app;
pub mod dispatch;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
