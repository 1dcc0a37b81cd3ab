use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{ContactForm, SubmitResponse};
use crate::state::AppState;
use crate::validation::validate_contact;

/// Contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}

/// POST /api/contact - Relay a contact form as an email
///
/// Dispatch failures answer 500 with a bare `{success: false}`; the cause is
/// only logged.
#[tracing::instrument(skip_all, fields(submission_id = %Uuid::new_v4()))]
async fn submit_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactForm>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let Json(form) = payload?;
    let submission = validate_contact(&form).map_err(AppError::Validation)?;

    match state.relay.send_contact(&submission).await {
        Ok(()) => {
            tracing::info!(service = %submission.service, "Contact submission relayed");
            Ok((StatusCode::OK, Json(SubmitResponse::ok())))
        }
        Err(e) => {
            tracing::error!(error = %e, "Email send failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmitResponse::failed()),
            ))
        }
    }
}
