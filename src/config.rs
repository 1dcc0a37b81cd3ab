use std::env;

/// Default request body limit, large enough for a typical mail attachment.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_upload_bytes: usize,
    pub mail: MailConfig,
}

/// Which backend actually transmits the mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportKind {
    Smtp,
    Resend,
    Memory,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Smtp => "smtp",
            TransportKind::Resend => "resend",
            TransportKind::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub transport: TransportKind,
    /// Sender address used as the `From` of every relayed email.
    pub sender: String,
    /// The single fixed recipient of every relayed email.
    pub receiver: String,
    pub smtp_host: String,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub resend_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let transport = match var("MAIL_TRANSPORT")
            .unwrap_or_else(|| "smtp".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "smtp" => TransportKind::Smtp,
            "resend" => TransportKind::Resend,
            "memory" => TransportKind::Memory,
            other => return Err(ConfigError::UnknownTransport(other.to_string())),
        };

        let smtp_username = var("EMAIL_USER");
        let sender = var("MAIL_FROM")
            .or_else(|| smtp_username.clone())
            .ok_or(ConfigError::MissingSender)?;
        let receiver = var("EMAIL_RECEIVER").ok_or(ConfigError::MissingReceiver)?;

        let resend_api_key = var("RESEND_API_KEY");
        if transport == TransportKind::Resend && resend_api_key.is_none() {
            return Err(ConfigError::MissingResendKey);
        }

        let smtp_port = match var("SMTP_PORT") {
            Some(port) => Some(port.parse().map_err(|_| ConfigError::InvalidSmtpPort)?),
            None => None,
        };

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(limit) => limit
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidUploadLimit(limit.clone()))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Config {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: var("SERVER_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            max_upload_bytes,
            mail: MailConfig {
                transport,
                sender,
                receiver,
                smtp_host: var("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
                smtp_port,
                smtp_username,
                smtp_password: var("EMAIL_PASS"),
                resend_api_key,
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Invalid SMTP port")]
    InvalidSmtpPort,
    #[error("Invalid MAX_UPLOAD_BYTES '{0}' (expected a byte count)")]
    InvalidUploadLimit(String),
    #[error("Unknown MAIL_TRANSPORT '{0}' (expected smtp, resend or memory)")]
    UnknownTransport(String),
    #[error("MAIL_FROM or EMAIL_USER environment variable is required")]
    MissingSender,
    #[error("EMAIL_RECEIVER environment variable is required")]
    MissingReceiver,
    #[error("RESEND_API_KEY environment variable is required for the resend transport")]
    MissingResendKey,
}
