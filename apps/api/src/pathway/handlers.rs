//! Axum route handlers for the pathway form and its JSON equivalent.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::learner::PathwayForm;
use crate::pathway::controller::{DeliveryStatus, SubmissionOutcome, SubmissionState};
use crate::pathway::views;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PathwayResponse {
    pub submission_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub pathway: String,
    pub download_file_name: String,
    pub pdf_base64: String,
    pub body_blocks: usize,
    pub pages: usize,
    pub delivery: DeliveryStatus,
    pub states: Vec<SubmissionState>,
}

impl From<SubmissionOutcome> for PathwayResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        PathwayResponse {
            submission_id: outcome.submission_id,
            started_at: outcome.started_at,
            pdf_base64: STANDARD.encode(&outcome.pdf),
            pathway: outcome.pathway,
            download_file_name: outcome.download_file_name,
            body_blocks: outcome.report.body_blocks,
            pages: outcome.report.pages,
            delivery: outcome.delivery,
            states: outcome.states,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_form_page() -> Html<String> {
    Html(views::form_page(None, &PathwayForm::default()))
}

/// POST /pathway
///
/// Urlencoded form submission. Errors re-render the form with an inline
/// message and the learner's input preserved.
pub async fn handle_submit_form(
    State(state): State<AppState>,
    Form(form): Form<PathwayForm>,
) -> Response {
    match state.controller.submit(form.clone()).await {
        Ok(outcome) => Html(views::result_page(&outcome)).into_response(),
        Err(err) => {
            err.log();
            (
                err.status(),
                Html(views::form_page(Some(&err.user_message()), &form)),
            )
                .into_response()
        }
    }
}

/// POST /api/v1/pathways
///
/// JSON submission. Delivery failure is reported in `delivery`, not as an error status.
pub async fn handle_create_pathway(
    State(state): State<AppState>,
    Json(form): Json<PathwayForm>,
) -> Result<Json<PathwayResponse>, AppError> {
    let outcome = state.controller.submit(form).await?;
    Ok(Json(outcome.into()))
}
