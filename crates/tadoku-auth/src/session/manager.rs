//! Session lifecycle manager: login and session re-issue.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use tadoku_core::config::AuthConfig;
use tadoku_core::error::AppError;
use tadoku_entity::user::{Identity, User};

use crate::jwt::{JwtEncoder, SessionClaims};
use crate::password::PasswordHasher;
use crate::user::UserStore;

/// Plaintext behind the unknown-email hash; never a valid login.
const DUMMY_PASSWORD: &str = "tadoku-unknown-account";

/// Result of a successful login or re-issue.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Signed session token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Issues session tokens for verified users.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Token encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// User lookup.
    user_store: Arc<dyn UserStore>,
    /// Credential verifier.
    password_hasher: Arc<PasswordHasher>,
    /// Session length.
    session_ttl: Duration,
    /// Hash checked on unknown emails so both login failures cost one
    /// Argon2 verification.
    dummy_hash: String,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        user_store: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
        auth_config: &AuthConfig,
    ) -> Result<Self, AppError> {
        let session_ttl = auth_config.session_ttl()?;
        let dummy_hash = password_hasher.hash_password(DUMMY_PASSWORD)?;

        Ok(Self {
            jwt_encoder,
            user_store,
            password_hasher,
            session_ttl,
            dummy_hash,
        })
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown email and wrong password produce the same error and both cost
    /// one Argon2 verification.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self.user_store.find_by_email(email).await?;

        let Some(user) = user else {
            self.password_hasher
                .verify_password_blocking(password.to_string(), self.dummy_hash.clone())
                .await;
            warn!("Login attempt for unknown email");
            return Err(AppError::authentication("Invalid email or password"));
        };

        let password_valid = self
            .password_hasher
            .verify_password_blocking(password.to_string(), user.password_hash.clone())
            .await;
        if !password_valid {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::authentication("Invalid email or password"));
        }

        let result = self.issue(user)?;
        info!(user_id = result.user.id, role = %result.user.role, "User logged in");
        Ok(result)
    }

    /// Re-issues a token for an already authenticated identity.
    ///
    /// The user is reloaded so role changes take effect.
    pub async fn refresh(&self, identity: &Identity) -> Result<LoginResult, AppError> {
        let user = self
            .user_store
            .find_by_id(identity.id)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        self.issue(user)
    }

    /// Signs a token for `user` valid for the configured session length.
    pub fn issue(&self, user: User) -> Result<LoginResult, AppError> {
        let claims = SessionClaims::for_identity(Identity::from(&user));
        let (token, expires_at) = self
            .jwt_encoder
            .encode(self.session_ttl, &claims)
            .map_err(|e| AppError::internal(e.to_string()))?;

        Ok(LoginResult {
            token,
            expires_at,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tadoku_core::config::PasswordHashConfig;
    use tadoku_core::error::ErrorKind;
    use tadoku_core::traits::{Clock, ManualClock};
    use tadoku_entity::user::UserRole;

    use crate::jwt::JwtDecoder;
    use crate::user::{MemoryUserStore, NewUser};

    struct Fixture {
        manager: SessionManager,
        decoder: JwtDecoder,
        store: Arc<MemoryUserStore>,
        clock: Arc<ManualClock>,
        hasher: Arc<PasswordHasher>,
    }

    fn fixture() -> Fixture {
        let config = AuthConfig {
            session_ttl_minutes: 60,
            ..AuthConfig::default()
        };
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let hasher = Arc::new(
            PasswordHasher::new(&PasswordHashConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );
        let store = Arc::new(MemoryUserStore::new());
        let manager = SessionManager::new(
            Arc::new(JwtEncoder::new(&config, clock.clone())),
            store.clone(),
            hasher.clone(),
            &config,
        )
        .unwrap();
        let decoder = JwtDecoder::new(&config, clock.clone());

        Fixture {
            manager,
            decoder,
            store,
            clock,
            hasher,
        }
    }

    async fn seed(f: &Fixture, email: &str, password: &str, role: UserRole) -> User {
        f.store
            .create(NewUser {
                email: email.to_string(),
                display_name: "Reader".to_string(),
                password_hash: f.hasher.hash_password(password).unwrap(),
                role,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_issues_decodable_token() {
        let f = fixture();
        let user = seed(&f, "reader@tadoku.app", "hunter22", UserRole::User).await;

        let result = f.manager.login("reader@tadoku.app", "hunter22").await.unwrap();
        assert_eq!(result.user.id, user.id);
        assert_eq!(result.expires_at, f.clock.now() + Duration::minutes(60));

        let claims = f.decoder.decode(&result.token).unwrap();
        assert_eq!(claims.user, Some(Identity::new(user.id, UserRole::User)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let f = fixture();
        seed(&f, "reader@tadoku.app", "hunter22", UserRole::User).await;

        let wrong_password = f
            .manager
            .login("reader@tadoku.app", "hunter23")
            .await
            .unwrap_err();
        let unknown_email = f
            .manager
            .login("ghost@tadoku.app", "hunter22")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.kind, ErrorKind::Authentication);
        assert_eq!(wrong_password.kind, unknown_email.kind);
        assert_eq!(wrong_password.message, unknown_email.message);
    }

    #[tokio::test]
    async fn test_refresh_picks_up_role_change() {
        let f = fixture();
        let user = seed(&f, "reader@tadoku.app", "hunter22", UserRole::User).await;
        let login = f.manager.login("reader@tadoku.app", "hunter22").await.unwrap();
        let identity = f.decoder.decode(&login.token).unwrap().user.unwrap();

        f.store.update_role(user.id, UserRole::Admin).await.unwrap();
        f.clock.advance(Duration::minutes(30));

        let refreshed = f.manager.refresh(&identity).await.unwrap();
        let claims = f.decoder.decode(&refreshed.token).unwrap();
        assert_eq!(claims.session().role(), Some(UserRole::Admin));
        assert!(refreshed.expires_at > login.expires_at);
    }

    #[tokio::test]
    async fn test_unknown_email_pays_verification_cost() {
        let config = AuthConfig::default();
        let clock = Arc::new(ManualClock::default());
        // Costly enough that one verification dwarfs a store lookup.
        let hasher = Arc::new(
            PasswordHasher::new(&PasswordHashConfig {
                memory_kib: 8 * 1024,
                iterations: 4,
                parallelism: 1,
            })
            .unwrap(),
        );
        let store = Arc::new(MemoryUserStore::new());
        store
            .create(NewUser {
                email: "reader@tadoku.app".to_string(),
                display_name: "Reader".to_string(),
                password_hash: hasher.hash_password("hunter22").unwrap(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        let manager = SessionManager::new(
            Arc::new(JwtEncoder::new(&config, clock)),
            store,
            hasher.clone(),
            &config,
        )
        .unwrap();

        assert!(!hasher.verify_password("hunter22", &manager.dummy_hash));
        assert!(hasher.verify_password(DUMMY_PASSWORD, &manager.dummy_hash));

        let start = std::time::Instant::now();
        manager.login("reader@tadoku.app", "hunter23").await.unwrap_err();
        let wrong_password = start.elapsed();

        let start = std::time::Instant::now();
        manager.login("ghost@tadoku.app", "hunter23").await.unwrap_err();
        let unknown_email = start.elapsed();

        assert!(
            unknown_email * 4 >= wrong_password,
            "unknown email took {unknown_email:?}, wrong password took {wrong_password:?}"
        );
    }

    #[test]
    fn test_out_of_range_ttl_rejected_at_construction() {
        let config = AuthConfig {
            session_ttl_minutes: 100_000_000_000_000,
            ..AuthConfig::default()
        };
        let clock = Arc::new(ManualClock::default());
        let result = SessionManager::new(
            Arc::new(JwtEncoder::new(&config, clock)),
            Arc::new(MemoryUserStore::new()),
            Arc::new(
                PasswordHasher::new(&PasswordHashConfig {
                    memory_kib: 1024,
                    iterations: 1,
                    parallelism: 1,
                })
                .unwrap(),
            ),
            &config,
        );

        assert_eq!(result.unwrap_err().kind, ErrorKind::Configuration);
    }
}
