//! The user lookup capability consumed by the authentication layer.

use async_trait::async_trait;

use tadoku_core::error::AppError;
use tadoku_entity::user::{User, UserRole};

/// Data needed to persist a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Name shown on rankings.
    pub display_name: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Initial role.
    pub role: UserRole,
}

/// Persistence for users.
///
/// Implementations must be thread-safe; the authentication layer only ever
/// reads through `find_*` on the request path.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Finds a user by login email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, AppError>;

    /// Persists a new user. Fails with a conflict if the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Replaces a user's password hash.
    async fn update_password(&self, id: u64, password_hash: String) -> Result<(), AppError>;

    /// Changes a user's role.
    async fn update_role(&self, id: u64, role: UserRole) -> Result<(), AppError>;
}
