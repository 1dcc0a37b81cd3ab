//! Turns validated submissions into emails and hands them to the mailer.

use askama::Template;

use crate::config::MailConfig;
use crate::mail::{MailError, Mailer, OutgoingEmail};
use crate::models::{ContactSubmission, FeedbackSubmission};

pub const CONTACT_SUBJECT: &str = "New Contact Form Submission";
pub const FEEDBACK_SENDER_NAME: &str = "Feedback Bot";

#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactEmailTemplate<'a> {
    submission: &'a ContactSubmission,
}

#[derive(Template)]
#[template(path = "emails/feedback.html")]
struct FeedbackEmailTemplate<'a> {
    rating: u8,
    feedback: &'a str,
    attachment: Option<&'a str>,
}

/// Fixed route every submission takes: configured sender to the single receiver.
#[derive(Clone)]
pub struct Relay {
    mailer: Mailer,
    sender: String,
    receiver: String,
}

/// Bare address of a mailbox that may carry a display name.
fn mailbox_address(mailbox: &str) -> &str {
    match (mailbox.find('<'), mailbox.rfind('>')) {
        (Some(start), Some(end)) if start < end => mailbox[start + 1..end].trim(),
        _ => mailbox.trim(),
    }
}

pub fn feedback_subject(rating: u8) -> String {
    format!("💬 New Feedback (Rating: {}/5)", rating)
}

impl Relay {
    pub fn new(mailer: Mailer, config: &MailConfig) -> Self {
        Self {
            mailer,
            sender: config.sender.clone(),
            receiver: config.receiver.clone(),
        }
    }

    pub fn mailer(&self) -> &Mailer {
        &self.mailer
    }

    pub fn compose_contact(&self, submission: &ContactSubmission) -> Result<OutgoingEmail, MailError> {
        let html = ContactEmailTemplate { submission }
            .render()
            .map_err(|e| MailError::Build(e.to_string()))?;

        Ok(OutgoingEmail {
            from: self.sender.clone(),
            to: self.receiver.clone(),
            subject: CONTACT_SUBJECT.to_string(),
            html,
            attachments: Vec::new(),
        })
    }

    /// Consumes the submission so the uploaded bytes move into the email.
    pub fn compose_feedback(&self, submission: FeedbackSubmission) -> Result<OutgoingEmail, MailError> {
        let rating = submission.rating.get();
        let html = FeedbackEmailTemplate {
            rating,
            feedback: &submission.feedback,
            attachment: submission.file.as_ref().map(|f| f.filename.as_str()),
        }
        .render()
        .map_err(|e| MailError::Build(e.to_string()))?;

        Ok(OutgoingEmail {
            from: format!("{} <{}>", FEEDBACK_SENDER_NAME, mailbox_address(&self.sender)),
            to: self.receiver.clone(),
            subject: feedback_subject(rating),
            html,
            attachments: submission.file.into_iter().collect(),
        })
    }

    pub async fn send_contact(&self, submission: &ContactSubmission) -> Result<(), MailError> {
        let email = self.compose_contact(submission)?;
        self.mailer.send(&email).await
    }

    pub async fn send_feedback(&self, submission: FeedbackSubmission) -> Result<(), MailError> {
        let email = self.compose_feedback(submission)?;
        self.mailer.send(&email).await
    }
}
