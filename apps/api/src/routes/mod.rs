pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::coach::handlers as coach_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyses", post(analysis_handlers::handle_analyze))
        .route(
            "/api/v1/analyses/:id",
            get(analysis_handlers::handle_get_analysis),
        )
        // Conversation coach API
        .route("/api/v1/coach", post(coach_handlers::handle_coach))
        .with_state(state)
}
