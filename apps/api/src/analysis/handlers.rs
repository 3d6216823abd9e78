//! Axum route handlers for the analysis API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::analysis::models::AnalysisRequest;
use crate::analysis::pipeline::{run_analysis, AnalysisOutcome};
use crate::analysis::store::{fetch_analysis, AnalysisRow};
use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/analyses
///
/// Full analysis pipeline. Validation happens here, before any model spend:
/// a request with no photos and no text is rejected outright.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    if !request.has_content() {
        return Err(AppError::Validation(
            "Provide at least one photo or some profile text".to_string(),
        ));
    }

    let outcome = run_analysis(
        &state.db,
        &state.llm,
        &state.submissions,
        state.config.item_cap,
        user_id,
        request,
    )
    .await?;

    Ok(Json(outcome))
}

/// GET /api/v1/analyses/:id
///
/// Returns a stored analysis. Callers only see their own rows.
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(analysis_id): Path<Uuid>,
) -> Result<Json<AnalysisRow>, AppError> {
    let row = fetch_analysis(&state.db, analysis_id)
        .await?
        .filter(|row| row.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?;

    Ok(Json(row))
}
