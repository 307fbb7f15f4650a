//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Placeholder secret shipped in the defaults.
const PLACEHOLDER_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Longest accepted session: one year.
pub const MAX_SESSION_TTL_MINUTES: u64 = 60 * 24 * 366;

/// Session token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token TTL in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie carries the `Secure` attribute.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 cost parameters.
    #[serde(default)]
    pub password_hash: PasswordHashConfig,
}

/// Argon2id cost parameters.
///
/// Defaults match the `argon2` crate defaults (19 MiB, 2 passes, 1 lane).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHashConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl AuthConfig {
    /// Returns whether the signing secret is still the shipped placeholder.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_SECRET
    }

    /// Returns the session TTL as a `chrono::Duration`.
    ///
    /// Fails instead of overflowing for values `validate` would reject.
    pub fn session_ttl(&self) -> Result<chrono::Duration, AppError> {
        Some(self.session_ttl_minutes)
            .filter(|minutes| *minutes <= MAX_SESSION_TTL_MINUTES)
            .and_then(|minutes| i64::try_from(minutes).ok())
            .and_then(chrono::Duration::try_minutes)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.session_ttl_minutes is out of range: {}",
                    self.session_ttl_minutes
                ))
            })
    }

    /// Checks the values that cannot be caught by deserialization.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.session_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.session_ttl_minutes must be greater than zero",
            ));
        }
        if self.session_ttl_minutes > MAX_SESSION_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.session_ttl_minutes must be at most {MAX_SESSION_TTL_MINUTES}"
            )));
        }
        if self.cookie_name.trim().is_empty() {
            return Err(AppError::configuration("auth.cookie_name must not be empty"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_minutes: default_session_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: default_true(),
            password_min_length: default_password_min(),
            password_hash: PasswordHashConfig::default(),
        }
    }
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_SECRET.to_string()
}

fn default_session_ttl() -> u64 {
    // One week
    60 * 24 * 7
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_true() -> bool {
    true
}

fn default_password_min() -> usize {
    6
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_bounds() {
        let mut config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.session_ttl().unwrap(),
            chrono::Duration::minutes(60 * 24 * 7)
        );

        config.session_ttl_minutes = MAX_SESSION_TTL_MINUTES;
        assert!(config.validate().is_ok());

        config.session_ttl_minutes = MAX_SESSION_TTL_MINUTES + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_session_ttl_is_an_error_not_a_panic() {
        let config = AuthConfig {
            session_ttl_minutes: 100_000_000_000_000,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.session_ttl().is_err());

        let config = AuthConfig {
            session_ttl_minutes: u64::MAX,
            ..AuthConfig::default()
        };
        assert!(config.session_ttl().is_err());
    }
}
