//! Account operations: registration, password change, role change.

use std::sync::Arc;

use tracing::info;

use tadoku_core::error::AppError;
use tadoku_entity::user::{Identity, User, UserRole};

use crate::password::{PasswordHasher, PasswordValidator};

use super::store::{NewUser, UserStore};

/// Account operations on top of a [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserService {
    /// User persistence.
    store: Arc<dyn UserStore>,
    /// Credential hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: PasswordValidator,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            store,
            hasher,
            validator,
        }
    }

    /// Registers a new user with role `User`.
    pub async fn register(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        if display_name.trim().is_empty() {
            return Err(AppError::validation("Display name must not be empty"));
        }
        self.validator.validate(password)?;

        if self.store.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = self
            .hasher
            .hash_password_blocking(password.to_string())
            .await?;

        let user = self
            .store
            .create(NewUser {
                email: email.to_string(),
                display_name: display_name.trim().to_string(),
                password_hash,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Returns the profile of the given user.
    pub async fn profile(&self, user_id: u64) -> Result<User, AppError> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Changes the caller's password after re-checking the current one.
    pub async fn change_password(
        &self,
        user_id: u64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.profile(user_id).await?;

        let matches = self
            .hasher
            .verify_password_blocking(current_password.to_string(), user.password_hash)
            .await;
        if !matches {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        self.validator
            .validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password)?;

        let password_hash = self
            .hasher
            .hash_password_blocking(new_password.to_string())
            .await?;
        self.store.update_password(user_id, password_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Changes another user's role. Admins cannot demote themselves.
    pub async fn change_role(
        &self,
        actor: &Identity,
        target_id: u64,
        role: UserRole,
    ) -> Result<User, AppError> {
        if actor.id == target_id && role < actor.role {
            return Err(AppError::validation("You cannot lower your own role"));
        }

        self.store.update_role(target_id, role).await?;
        info!(actor_id = actor.id, target_id, role = %role, "User role changed");

        self.profile(target_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tadoku_core::config::{AuthConfig, PasswordHashConfig};
    use tadoku_core::error::ErrorKind;

    use crate::user::MemoryUserStore;

    fn service() -> UserService {
        let hasher = PasswordHasher::new(&PasswordHashConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        UserService::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(hasher),
            PasswordValidator::new(&AuthConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();
        let user = service
            .register("reader@tadoku.app", "Reader", "hunter22")
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::User);
        assert_ne!(user.password_hash, "hunter22");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let service = service();

        let err = service.register("nope", "Reader", "hunter22").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service
            .register("reader@tadoku.app", "Reader", "short")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        service
            .register("reader@tadoku.app", "Reader", "hunter22")
            .await
            .unwrap();
        let err = service
            .register("reader@tadoku.app", "Other", "hunter22")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_change_password() {
        let service = service();
        let user = service
            .register("reader@tadoku.app", "Reader", "hunter22")
            .await
            .unwrap();

        let err = service
            .change_password(user.id, "wrong-one", "brand-new")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        let err = service
            .change_password(user.id, "hunter22", "hunter22")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        service
            .change_password(user.id, "hunter22", "brand-new")
            .await
            .unwrap();

        let stored = service.profile(user.id).await.unwrap();
        assert_ne!(stored.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn test_change_role() {
        let service = service();
        let admin = service
            .register("admin@tadoku.app", "Admin", "hunter22")
            .await
            .unwrap();
        let reader = service
            .register("reader@tadoku.app", "Reader", "hunter22")
            .await
            .unwrap();
        let actor = Identity::new(admin.id, UserRole::Admin);

        let promoted = service
            .change_role(&actor, reader.id, UserRole::Admin)
            .await
            .unwrap();
        assert_eq!(promoted.role, UserRole::Admin);

        let err = service
            .change_role(&actor, admin.id, UserRole::Guest)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
