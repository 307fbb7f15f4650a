//! Argon2id password hashing and verification.

use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::rand_core::{OsRng, RngCore};
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, Salt, SaltString};
use thiserror::Error;

use tadoku_core::config::PasswordHashConfig;
use tadoku_core::error::AppError;

/// Failure to produce a credential hash.
///
/// The messages are for logs only; callers surface a generic server error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashingError {
    /// The operating system could not provide salt entropy.
    #[error("failed to gather salt entropy: {0}")]
    Entropy(String),
    /// The configured cost parameters are out of range.
    #[error("invalid Argon2 parameters: {0}")]
    Parameters(String),
    /// Argon2 itself failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

impl From<HashingError> for AppError {
    fn from(err: HashingError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Cost parameters used for new hashes.
    params: Params,
}

impl PasswordHasher {
    /// Creates a hasher with the given cost parameters.
    pub fn new(config: &PasswordHashConfig) -> Result<Self, HashingError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| HashingError::Parameters(e.to_string()))?;

        Ok(Self { params })
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    ///
    /// CPU-bound; async callers should use [`hash_password_blocking`](Self::hash_password_blocking).
    pub fn hash_password(&self, password: &str) -> Result<String, HashingError> {
        let mut bytes = [0u8; Salt::RECOMMENDED_LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| HashingError::Entropy(e.to_string()))?;
        let salt = SaltString::encode_b64(&bytes).map_err(|e| HashingError::Hash(e.to_string()))?;

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashingError::Hash(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `false` for a wrong password and for a malformed hash. The cost
    /// parameters embedded in the stored hash are used, so hashes created
    /// under older settings keep verifying.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Runs [`hash_password`](Self::hash_password) on the blocking pool.
    pub async fn hash_password_blocking(&self, password: String) -> Result<String, HashingError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| HashingError::Hash(format!("hashing task failed: {e}")))?
    }

    /// Runs [`verify_password`](Self::verify_password) on the blocking pool.
    ///
    /// A panicked or cancelled task counts as a mismatch.
    pub async fn verify_password_blocking(&self, password: String, hash: String) -> bool {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .unwrap_or(false)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
