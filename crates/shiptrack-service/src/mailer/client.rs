//! HTTP mail API client used for password-reset links.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use shiptrack_core::config::mailer::MailerConfig;
use shiptrack_core::error::AppError;
use shiptrack_core::result::AppResult;

/// Sends a single email. Implemented by the HTTP client in production and
/// by stubs in tests.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message to `recipient`.
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> AppResult<()>;
}

/// Mailer backed by an HTTP mail API.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    http: reqwest::Client,
    base_url: String,
    sender: String,
    authorization_token: String,
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
}

impl HttpMailer {
    /// Create a new mailer from configuration.
    pub fn new(config: &MailerConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            sender: config.sender.clone(),
            authorization_token: config.authorization_token.clone(),
            enabled: config.enabled,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> AppResult<()> {
        if !self.enabled {
            debug!(to = recipient, subject, "Mail delivery disabled; dropping message");
            return Ok(());
        }

        let url = format!("{}/email", self.base_url);
        let body = SendEmailRequest {
            from: &self.sender,
            to: recipient,
            subject,
            html_body,
        };

        self.http
            .post(&url)
            .header("Authorization", &self.authorization_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Mail API request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::external_service(format!("Mail API rejected message: {e}")))?;

        Ok(())
    }
}
