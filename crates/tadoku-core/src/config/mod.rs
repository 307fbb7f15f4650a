//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, Environment, ServerConfig};
pub use self::auth::{AuthConfig, PasswordHashConfig};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Session token and credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `TADOKU_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TADOKU")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make session tokens forgeable or leak
    /// them over plain HTTP.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;

        if self.environment == Environment::Production {
            if self.auth.uses_placeholder_secret() {
                return Err(AppError::configuration(
                    "auth.jwt_secret must be set in production",
                ));
            }
            if !self.auth.cookie_secure {
                return Err(AppError::configuration(
                    "auth.cookie_secure cannot be disabled in production",
                ));
            }
        } else if self.auth.uses_placeholder_secret() {
            tracing::warn!(
                environment = %self.environment,
                "Using the placeholder JWT secret; do not deploy this configuration"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_outside_production() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_real_secret() {
        let mut config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config.auth.jwt_secret = "a-long-random-production-secret".to_string();
        assert!(config.validate().is_ok());

        config.auth.cookie_secure = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = String::new();
        assert!(config.validate().is_err());
    }
}
