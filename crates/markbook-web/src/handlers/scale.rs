//! Default grading scale endpoint.

use axum::response::IntoResponse;
use axum::Json;
use markbook_engine::default_grading_scale;

/// GET /api/grading-scale/default - The scale instructors start from.
pub async fn get_default_scale() -> impl IntoResponse {
    Json(serde_json::json!({
        "scale": default_grading_scale(),
        "description": "Standard grading scale"
    }))
}
