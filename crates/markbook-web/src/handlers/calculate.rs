//! Grade calculation endpoint.

use axum::extract::State;
use axum::Json;
use markbook_common::{ApiError, Result};
use markbook_engine::{
    CalculationOutput, GradeCategory, GradingScale, ReplacementRule, StudentResult, Summary,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::state::{AppState, SharedState};

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub session_id: Uuid,
    pub categories: Vec<GradeCategory>,
    #[serde(default = "markbook_engine::default_grading_scale")]
    pub grading_scale: GradingScale,
    #[serde(default)]
    pub replacement_rules: Vec<ReplacementRule>,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub session_id: Uuid,
    pub results: Vec<StudentResult>,
    pub summary: Summary,
}

/// POST /api/calculate - Compute final grades for every student in the
/// session against the user-defined categories.
pub async fn calculate_grades(
    State(state): State<SharedState>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>> {
    let output = run_calculation(&state, &request).await?;
    info!(
        session_id = %request.session_id,
        students = output.summary.total_students,
        "grades calculated"
    );
    Ok(Json(CalculateResponse {
        session_id: request.session_id,
        results: output.results,
        summary: output.summary,
    }))
}

/// Shared by the calculate and export endpoints: fetch the session roster
/// and run the engine. Weight-sum violations surface as 400, a missing
/// session as 404.
pub(crate) async fn run_calculation(
    state: &AppState,
    request: &CalculateRequest,
) -> Result<CalculationOutput> {
    let data = state
        .sessions
        .get(&request.session_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Session not found or expired".to_string()))?;

    markbook_engine::calculate(
        &data.students,
        &data.points_possible,
        &request.categories,
        &request.grading_scale,
        &request.replacement_rules,
    )
    .map_err(|err| ApiError::BadRequest(err.to_string()))
}
