#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;

use formrelay_backend::api;
use formrelay_backend::config::{Config, MailConfig, TransportKind, DEFAULT_MAX_UPLOAD_BYTES};
use formrelay_backend::mail::{MailError, MailTransport, Mailer, OutgoingEmail};
use formrelay_backend::state::AppState;

pub const BOUNDARY: &str = "formrelay-test-boundary";

pub fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        mail: MailConfig {
            transport: TransportKind::Memory,
            sender: "site@example.com".to_string(),
            receiver: "owner@example.com".to_string(),
            smtp_host: "localhost".to_string(),
            smtp_port: None,
            smtp_username: None,
            smtp_password: None,
            resend_api_key: None,
        },
    }
}

/// Transport standing in for a mail provider that is down
#[derive(Clone, Default)]
pub struct FailingTransport;

#[async_trait::async_trait]
impl MailTransport for FailingTransport {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), MailError> {
        Err(MailError::Transport(
            "535 Username and Password not accepted".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

pub fn app_with(config: Config, transport: impl MailTransport + 'static) -> Router {
    api::create_router(AppState::new(config, Mailer::new(transport)))
}

pub fn app(transport: impl MailTransport + 'static) -> Router {
    app_with(test_config(), transport)
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("Body should be UTF-8")
}

pub fn json_request(uri: &str, value: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .expect("Should build request")
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("Should build request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Should build request")
}

/// One part of a hand-built multipart body
pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        content: &'a [u8],
    },
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                filename,
                content_type,
                content,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("Should build request")
}
