pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pathway::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Learner-facing form
        .route("/", get(handlers::handle_form_page))
        .route("/pathway", post(handlers::handle_submit_form))
        // JSON API
        .route("/api/v1/pathways", post(handlers::handle_create_pathway))
        .with_state(state)
}
