//! Gradebook upload. The CSV is parsed straight out of the multipart body
//! and stored in memory only.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use markbook_common::{ApiError, Result};
use markbook_ingestion::{parse_gradebook, ParsedGradebook};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub data: ParsedGradebook,
}

/// POST /api/upload - Parse a Canvas gradebook CSV into a new session.
pub async fn upload_gradebook(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut filename = String::new();
    let mut file_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().unwrap_or_default().to_string();
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::BadRequest(err.to_string()))?,
            );
        }
    }

    let bytes =
        file_bytes.ok_or_else(|| ApiError::BadRequest("No file data received".to_string()))?;
    if !filename.ends_with(".csv") {
        return Err(ApiError::BadRequest("File must be a CSV".to_string()));
    }

    let parsed = parse_gradebook(&bytes, &filename)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    state.sessions.sweep().await;
    let session_id = state.sessions.put(parsed.clone()).await;
    info!(
        %session_id,
        students = parsed.row_count,
        assignments = parsed.assignment_columns.len(),
        "gradebook uploaded"
    );

    Ok(Json(UploadResponse {
        session_id,
        data: parsed,
    }))
}
