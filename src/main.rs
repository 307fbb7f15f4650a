//! Tadoku contest server.
//!
//! Loads configuration, initializes logging, and serves the HTTP API.

use tracing_subscriber::{EnvFilter, fmt};

use tadoku_core::config::AppConfig;
use tadoku_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Starting Tadoku v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = tadoku_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the overlay named by `TADOKU_CONFIG_ENV`, and
/// `TADOKU__*` environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TADOKU_CONFIG_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
