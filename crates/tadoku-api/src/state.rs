//! Shared application state passed to all handlers via Axum's `State` extractor.

use std::sync::Arc;

use tadoku_auth::jwt::{JwtDecoder, JwtEncoder};
use tadoku_auth::password::{PasswordHasher, PasswordValidator};
use tadoku_auth::rbac::AccessPolicy;
use tadoku_auth::session::SessionManager;
use tadoku_auth::user::{UserService, UserStore};
use tadoku_core::config::AppConfig;
use tadoku_core::error::AppError;
use tadoku_core::traits::Clock;

use crate::dispatch::{Dispatcher, SessionCookie, SessionResolver};

/// Application state shared across all request handlers.
///
/// Built once at startup; every field is read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Login and session re-issue.
    pub session_manager: Arc<SessionManager>,
    /// Account operations.
    pub user_service: Arc<UserService>,
    /// Session cookie settings.
    pub session_cookie: SessionCookie,
    /// Token to caller resolution, shared with the dispatcher.
    pub resolver: Arc<SessionResolver>,
}

impl AppState {
    /// Wires the auth components around `store` and `clock`.
    ///
    /// The encoder and decoder share the same clock, so issuance and expiry
    /// checks never disagree.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn UserStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let auth = &config.auth;

        let password_hasher = Arc::new(PasswordHasher::new(&auth.password_hash)?);
        let jwt_encoder = Arc::new(JwtEncoder::new(auth, Arc::clone(&clock)));
        let jwt_decoder = Arc::new(JwtDecoder::new(auth, clock));

        let session_manager = Arc::new(SessionManager::new(
            jwt_encoder,
            Arc::clone(&store),
            Arc::clone(&password_hasher),
            auth,
        )?);
        let user_service = Arc::new(UserService::new(
            store,
            password_hasher,
            PasswordValidator::new(auth),
        ));

        let session_cookie = SessionCookie::new(auth);
        let resolver = Arc::new(SessionResolver::new(session_cookie.clone(), jwt_decoder));

        Ok(Self {
            config: Arc::new(config),
            session_manager,
            user_service,
            session_cookie,
            resolver,
        })
    }

    /// A dispatcher sharing this state's session resolver.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::clone(&self.resolver), AccessPolicy::new())
    }
}
