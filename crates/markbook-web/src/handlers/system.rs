//! Health and root endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::state::SharedState;

/// GET / - Service banner
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Markbook Grade Converter API"
    }))
}

/// GET /api/health - Health check; also sweeps expired sessions.
pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    let expired_cleaned = state.sessions.sweep().await;
    Json(serde_json::json!({
        "status": "healthy",
        "active_sessions": state.sessions.len().await,
        "expired_cleaned": expired_cleaned,
    }))
}
