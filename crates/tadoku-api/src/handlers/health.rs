//! Health check handler.

/// GET /ping
pub async fn ping() -> &'static str {
    "pong"
}
