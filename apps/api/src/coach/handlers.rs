//! Axum route handlers for the conversation coach.

use axum::{extract::State, Json};

use crate::auth::AuthedUser;
use crate::coach::models::{CoachReply, CoachRequest};
use crate::coach::pipeline::run_coach;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/coach
///
/// Openers, tips, and follow-ups for a match. Same validation stance as the
/// analysis route: no usable content, no model spend.
pub async fn handle_coach(
    State(state): State<AppState>,
    AuthedUser(_user_id): AuthedUser,
    Json(request): Json<CoachRequest>,
) -> Result<Json<CoachReply>, AppError> {
    if !request.has_content() {
        return Err(AppError::Validation(
            "Provide the match's bio or a conversation excerpt".to_string(),
        ));
    }

    let reply = run_coach(&state.llm, &request, state.config.item_cap).await;
    Ok(Json(reply))
}
