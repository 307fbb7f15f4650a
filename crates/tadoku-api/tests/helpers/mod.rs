//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, Duration};
use serde_json::Value;
use tower::ServiceExt;

use tadoku_api::AppState;
use tadoku_api::dispatch::Route;
use tadoku_auth::jwt::{JwtEncoder, SessionClaims};
use tadoku_auth::password::PasswordHasher;
use tadoku_auth::user::{MemoryUserStore, NewUser, UserStore};
use tadoku_core::config::{AppConfig, PasswordHashConfig};
use tadoku_entity::user::{Identity, User, UserRole};
use tadoku_core::traits::ManualClock;

/// Signing secret used by every test app.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Session cookie name used by every test app.
pub const COOKIE_NAME: &str = "session_token";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application state behind the router
    pub state: AppState,
    /// Shared clock; advancing it ages every token
    pub clock: Arc<ManualClock>,
    /// Backing user store
    pub store: Arc<MemoryUserStore>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application serving the real route table
    pub fn new() -> Self {
        Self::build(|state| tadoku_api::build_app(state).expect("Failed to build app"))
    }

    /// Create a test application serving only `routes`
    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self::build(|state| {
            state
                .dispatcher()
                .mount(routes)
                .expect("Failed to mount routes")
                .with_state(state)
        })
    }

    fn build(make_router: impl FnOnce(AppState) -> Router) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.auth.cookie_name = COOKIE_NAME.to_string();
        config.auth.session_ttl_minutes = 60;
        config.auth.password_hash = cheap_hash_config();

        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
        ));
        let store = Arc::new(MemoryUserStore::with_clock(clock.clone()));

        let state = AppState::new(config.clone(), store.clone(), clock.clone())
            .expect("Failed to build state");
        let router = make_router(state.clone());

        Self {
            router,
            state,
            clock,
            store,
            config,
        }
    }

    /// Sign a token for `claims` with the app's secret and clock
    pub fn token_for(&self, claims: &SessionClaims, ttl: Duration) -> String {
        self.token_signed_with(TEST_SECRET.as_bytes(), claims, ttl)
    }

    /// Sign a token with an arbitrary secret, using the app's clock
    pub fn token_signed_with(&self, secret: &[u8], claims: &SessionClaims, ttl: Duration) -> String {
        JwtEncoder::from_secret(secret, self.clock.clone())
            .encode(ttl, claims)
            .expect("Failed to sign token")
            .0
    }

    /// Sign a token for an identity with the given role
    pub fn token_for_role(&self, id: u64, role: UserRole) -> String {
        self.token_for(
            &SessionClaims::for_identity(Identity::new(id, role)),
            Duration::hours(1),
        )
    }

    /// Create a test user directly in the store
    pub async fn create_test_user(&self, email: &str, password: &str, role: UserRole) -> User {
        let hasher = PasswordHasher::new(&self.config.auth.password_hash)
            .expect("Failed to build hasher");
        let hash = hasher.hash_password(password).expect("Failed to hash password");

        self.store
            .create(NewUser {
                email: email.to_string(),
                display_name: email.split('@').next().unwrap_or(email).to_string(),
                password_hash: hash,
                role,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Login and return the session cookie value
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self.request("POST", "/sessions", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .session_cookie()
            .expect("No session cookie in login response")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(COOKIE, format!("{COOKIE_NAME}={token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            body_len: body_bytes.len(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` if not JSON
    pub body: Value,
    /// Raw body length
    pub body_len: usize,
}

impl TestResponse {
    /// The session cookie's `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{COOKIE_NAME}=")))
            .map(str::to_string)
    }

    /// The session cookie's value from `Set-Cookie`, if any
    pub fn session_cookie(&self) -> Option<String> {
        let header = self.set_cookie()?;
        let pair = header.split(';').next()?;
        let value = pair.split_once('=')?.1;
        (!value.is_empty()).then(|| value.to_string())
    }
}

fn cheap_hash_config() -> PasswordHashConfig {
    PasswordHashConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}
