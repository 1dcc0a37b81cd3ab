pub mod memory;
pub mod resend;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{MailConfig, TransportKind};
use crate::models::Attachment;

/// A fully composed email, ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Mailbox, either `addr@host` or `Name <addr@host>`.
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid mailbox '{0}'")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Anything able to deliver an [`OutgoingEmail`]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Short backend name, reported by the health endpoint.
    fn name(&self) -> &'static str;
}

/// Mailer abstraction over the configured transport
#[derive(Clone)]
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
}

impl Mailer {
    pub fn new(transport: impl MailTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create the mailer selected by `MAIL_TRANSPORT`
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let mailer = match config.transport {
            TransportKind::Smtp => Self::new(smtp::SmtpMailer::new(config)?),
            TransportKind::Resend => Self::new(resend::ResendMailer::new(config)?),
            TransportKind::Memory => Self::new(memory::MemoryTransport::new()),
        };
        Ok(mailer)
    }

    pub async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.transport.send(email).await
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }
}
