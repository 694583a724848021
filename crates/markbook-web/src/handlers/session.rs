//! Session fetch and delete.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use markbook_common::{ApiError, Result};
use uuid::Uuid;

use crate::state::SharedState;

/// GET /api/session/{id} - Session data; refreshes the expiry clock.
pub async fn get_session(
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let data = state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Session not found or expired".to_string()))?;
    Ok(Json(data))
}

/// DELETE /api/session/{id} - Drop a session and all its data, for
/// "Start Over" in the frontend.
pub async fn delete_session(
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    let status = if state.sessions.delete(&session_id).await {
        "deleted"
    } else {
        "not_found"
    };
    Json(serde_json::json!({
        "status": status,
        "session_id": session_id,
    }))
}
