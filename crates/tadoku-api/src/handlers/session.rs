//! Session handlers: login, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use tadoku_auth::session::LoginResult;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /sessions
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    req.validate()?;

    let result = state
        .session_manager
        .login(&req.email, &req.password)
        .await?;

    Ok(session_reply(&state, jar, result))
}

/// POST /sessions/refresh
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    let result = state.session_manager.refresh(auth.identity()).await?;
    Ok(session_reply(&state, jar, result))
}

/// DELETE /sessions
///
/// Tokens are stateless; ending a session only removes the cookie.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    tracing::info!(user_id = auth.id, "User logged out");
    (
        state.session_cookie.clear(jar),
        Json(ApiResponse::ok(MessageResponse::new("Logged out"))),
    )
}

fn session_reply(
    state: &AppState,
    jar: CookieJar,
    result: LoginResult,
) -> (CookieJar, Json<ApiResponse<SessionResponse>>) {
    let jar = state.session_cookie.issue(jar, result.token);
    let body = SessionResponse {
        user: result.user.into(),
        expires_at: result.expires_at,
    };
    (jar, Json(ApiResponse::ok(body)))
}
