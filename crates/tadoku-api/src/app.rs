//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use tadoku_auth::user::MemoryUserStore;
use tadoku_core::config::AppConfig;
use tadoku_core::error::{AppError, ErrorKind};
use tadoku_core::traits::SystemClock;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Result<Router, AppError> {
    let cors = build_cors_layer(&state.config.server.cors);

    Ok(build_router(state)?
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Runs the server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(environment = %config.environment, "Starting Tadoku server...");

    let bind_address = config.server.bind_address();
    let store = Arc::new(MemoryUserStore::new());
    let state = AppState::new(config, store, Arc::new(SystemClock))?;
    let app = build_app(state)?;

    let listener = TcpListener::bind(&bind_address).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Internal,
            format!("Failed to bind {bind_address}"),
            e,
        )
    })?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Server error", e)
        })?;

    tracing::info!("Tadoku server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
