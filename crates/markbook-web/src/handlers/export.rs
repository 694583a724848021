//! CSV export endpoint. Runs the same calculation as /api/calculate and
//! streams the result back as a download; nothing is written to disk.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use markbook_common::Result;
use markbook_engine::export_csv;
use tracing::info;

use crate::handlers::calculate::{run_calculation, CalculateRequest};
use crate::state::SharedState;

/// POST /api/export - Calculate and download grades as CSV.
pub async fn export_grades(
    State(state): State<SharedState>,
    Json(request): Json<CalculateRequest>,
) -> Result<impl IntoResponse> {
    let output = run_calculation(&state, &request).await?;
    let csv = export_csv(&output.results, &request.categories);

    let filename = format!(
        "grades_export_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    info!(session_id = %request.session_id, %filename, "grades exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        csv,
    ))
}
