use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Attachment, FeedbackSubmission, SubmitResponse};
use crate::state::AppState;
use crate::validation::validate_feedback;

/// Raw parts of a feedback form post
#[derive(Debug, Default)]
pub struct FeedbackParts {
    pub rating: Option<String>,
    pub feedback: Option<String>,
    pub file: Option<Attachment>,
}

impl FeedbackParts {
    pub fn validate(self) -> Result<FeedbackSubmission> {
        validate_feedback(self.rating.as_deref(), self.feedback.as_deref(), self.file)
            .map_err(AppError::Validation)
    }
}

/// Read `rating`, `feedback` and the optional `file` part.
///
/// Unknown parts are skipped. A file part without a filename is what browsers
/// send when nothing was picked, so it counts as no file.
pub async fn read_feedback_parts(mut multipart: Multipart) -> Result<FeedbackParts> {
    let mut parts = FeedbackParts::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "rating" => parts.rating = Some(field.text().await?),
            "feedback" => parts.feedback = Some(field.text().await?),
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await?;

                if !filename.is_empty() {
                    parts.file = Some(Attachment {
                        filename,
                        content_type,
                        content: content.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(parts)
}

/// Feedback routes
pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/feedback", post(submit_feedback))
}

/// POST /api/feedback - Relay a rating, comment and optional file as an email
#[tracing::instrument(skip_all, fields(submission_id = %Uuid::new_v4()))]
async fn submit_feedback(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<SubmitResponse>> {
    let submission = read_feedback_parts(multipart?).await?.validate()?;

    let rating = submission.rating;
    let attachment = submission.file.as_ref().map(|f| f.content.len());

    state.relay.send_feedback(submission).await?;

    tracing::info!(%rating, attachment_bytes = ?attachment, "Feedback submission relayed");
    Ok(Json(SubmitResponse::ok()))
}
