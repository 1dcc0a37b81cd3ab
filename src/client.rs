//! How a form view reaches its handler.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

use crate::models::{ContactSubmission, FeedbackSubmission};
use crate::relay::Relay;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The handler could not be reached or the exchange broke off.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The handler answered with a non-success status.
    #[error("Submission rejected with status {status}")]
    Rejected { status: u16 },
}

/// Sends one submission to its handler; no retries.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), ClientError>;

    async fn submit_feedback(&self, submission: FeedbackSubmission) -> Result<(), ClientError>;
}

/// Talks to a running server over HTTP, like the browser forms do
#[derive(Clone)]
pub struct HttpSubmissionClient {
    client: Client,
    base_url: String,
}

impl HttpSubmissionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check_status(res: Response) -> Result<(), ClientError> {
    if res.status().is_success() {
        Ok(())
    } else {
        Err(ClientError::Rejected {
            status: res.status().as_u16(),
        })
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), ClientError> {
        let res = self
            .client
            .post(self.url("/api/contact"))
            .json(submission)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        check_status(res)
    }

    async fn submit_feedback(&self, submission: FeedbackSubmission) -> Result<(), ClientError> {
        let mut form = Form::new()
            .text("rating", submission.rating.to_string())
            .text("feedback", submission.feedback);

        if let Some(file) = submission.file {
            let mime = file.mime_type();
            let part = Part::bytes(file.content)
                .file_name(file.filename)
                .mime_str(&mime)
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            form = form.part("file", part);
        }

        let res = self
            .client
            .post(self.url("/api/feedback"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        check_status(res)
    }
}

/// Hands submissions straight to the relay, for views rendered by this server
#[derive(Clone)]
pub struct InProcessClient {
    relay: Arc<Relay>,
}

impl InProcessClient {
    pub fn new(relay: Arc<Relay>) -> Self {
        Self { relay }
    }
}

#[async_trait]
impl SubmissionClient for InProcessClient {
    async fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), ClientError> {
        self.relay.send_contact(submission).await.map_err(|e| {
            tracing::error!(error = %e, "Email send failed");
            ClientError::Rejected { status: 500 }
        })
    }

    async fn submit_feedback(&self, submission: FeedbackSubmission) -> Result<(), ClientError> {
        self.relay.send_feedback(submission).await.map_err(|e| {
            tracing::error!(error = %e, "Email send failed");
            ClientError::Rejected { status: 500 }
        })
    }
}
