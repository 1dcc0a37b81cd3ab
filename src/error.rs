use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::mail::MailError;
use crate::models::SubmitResponse;
use crate::validation::FieldErrors;

/// Generic message returned when the mail collaborator fails.
pub const DISPATCH_FAILED: &str = "Email failed to send";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, SubmitResponse::failed_with(msg)),
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, SubmitResponse::invalid(errors)),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                SubmitResponse::failed_with("Upload is too large"),
            ),
            AppError::Mail(err) => {
                tracing::error!(error = %err, "Email send failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SubmitResponse::failed_with(DISPATCH_FAILED),
                )
            }
            AppError::Template(err) => {
                tracing::error!(error = %err, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SubmitResponse::failed())
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::BadRequest(format!("JSON error: {}", err.body_text()))
    }
}

impl From<FormRejection> for AppError {
    fn from(err: FormRejection) -> Self {
        AppError::BadRequest(format!("Form error: {}", err.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(err: MultipartRejection) -> Self {
        AppError::BadRequest(format!("Multipart error: {}", err.body_text()))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest(format!("Multipart error: {}", err.body_text()))
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
