use lettre::message::{
    header::ContentType, Attachment as MailAttachment, Mailbox, MultiPart, SinglePart,
};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use super::{MailError, MailTransport, OutgoingEmail};
use crate::config::MailConfig;

const STARTTLS_PORT: u16 = 587;

/// SMTP relay (Gmail by default) using lettre's pooled transport
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let host = config.smtp_host.as_str();

        let transport = match (&config.smtp_username, &config.smtp_password) {
            (Some(username), Some(password)) => {
                let builder = if config.smtp_port == Some(STARTTLS_PORT) {
                    SmtpTransport::starttls_relay(host)
                } else {
                    SmtpTransport::relay(host)
                }
                .map_err(|e| MailError::Transport(e.to_string()))?;

                let builder = match config.smtp_port {
                    Some(port) => builder.port(port),
                    None => builder,
                };

                info!(
                    smtp_host = %host,
                    smtp_port = ?config.smtp_port,
                    "SMTP transport initialized with authentication and TLS"
                );
                builder
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .build()
            }
            _ => {
                // Local catch-all servers (MailDev, MailHog) take plain connections
                info!(
                    smtp_host = %host,
                    smtp_port = ?config.smtp_port,
                    "SMTP credentials not configured, using unauthenticated connection"
                );
                SmtpTransport::builder_dangerous(host)
                    .port(config.smtp_port.unwrap_or(25))
                    .build()
            }
        };

        Ok(Self { transport })
    }
}

fn parse_mailbox(value: &str) -> Result<Mailbox, MailError> {
    value
        .parse()
        .map_err(|_| MailError::InvalidAddress(value.to_string()))
}

/// Turn an [`OutgoingEmail`] into a MIME message.
pub fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let builder = Message::builder()
        .from(parse_mailbox(&email.from)?)
        .to(parse_mailbox(&email.to)?)
        .subject(email.subject.clone());

    let html = SinglePart::html(email.html.clone());

    let message = if email.attachments.is_empty() {
        builder.singlepart(html)
    } else {
        let mut body = MultiPart::mixed().singlepart(html);
        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.mime_type())
                .or_else(|_| ContentType::parse("application/octet-stream"))
                .map_err(|e| MailError::Build(e.to_string()))?;
            body = body.singlepart(
                MailAttachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }
        builder.multipart(body)
    };

    message.map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
