pub mod contact;
pub mod feedback;

use serde::{Deserialize, Serialize};

use crate::validation::FieldErrors;

pub use contact::{ContactForm, ContactSubmission, ContactType, Service};
pub use feedback::{Attachment, FeedbackSubmission, InvalidRating, Rating};

/// Body returned by both submission endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<FieldErrors>,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            errors: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: None,
            errors: None,
        }
    }

    pub fn failed_with(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::failed()
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            errors: Some(errors),
            ..Self::failed()
        }
    }
}
