//! Route table for the Tadoku HTTP API.
//!
//! Every route is declared with its minimum role and mounted through the
//! [`Dispatcher`](crate::dispatch::Dispatcher); nothing is routed around it.

use axum::Router;
use axum::middleware as axum_middleware;

use tadoku_core::error::AppError;
use tadoku_entity::user::UserRole;

use crate::dispatch::Route;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// The declared routes, in mount order.
pub fn routes() -> Vec<Route> {
    vec![
        Route::get("/ping", handlers::health::ping),
        // Sessions
        Route::post("/sessions", handlers::session::login),
        Route::post("/sessions/refresh", handlers::session::refresh).min_role(UserRole::User),
        Route::delete("/sessions", handlers::session::logout).min_role(UserRole::User),
        // Users
        Route::post("/users", handlers::user::register),
        Route::get("/users/me", handlers::user::me).min_role(UserRole::User),
        Route::put("/users/me/password", handlers::user::change_password)
            .min_role(UserRole::User),
        Route::put("/users/{id}/role", handlers::user::change_role).min_role(UserRole::Admin),
    ]
}

/// Build the Axum router with all routes and the request logging layer.
pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let router = state.dispatcher().mount(routes())?;

    Ok(router
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state))
}
