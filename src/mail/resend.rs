use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Serialize;

use super::{MailError, MailTransport, OutgoingEmail};
use crate::config::MailConfig;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<PayloadAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct PayloadAttachment<'a> {
    filename: &'a str,
    content: String,
    content_type: String,
}

impl<'a> Payload<'a> {
    fn from_email(email: &'a OutgoingEmail) -> Self {
        Self {
            from: &email.from,
            to: vec![email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            attachments: email
                .attachments
                .iter()
                .map(|a| PayloadAttachment {
                    filename: &a.filename,
                    content: STANDARD.encode(&a.content),
                    content_type: a.mime_type(),
                })
                .collect(),
        }
    }
}

impl ResendMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let api_key = config
            .resend_api_key
            .clone()
            .ok_or_else(|| MailError::Transport("RESEND_API_KEY missing".to_string()))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            endpoint: RESEND_ENDPOINT.to_string(),
        })
    }

    /// Point the mailer at another API root (self-hosted proxy, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait::async_trait]
impl MailTransport for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let payload = Payload::from_email(email);

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(MailError::Rejected { status, body });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}
