//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Settings for the HTTP mail API used to deliver password-reset links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    /// Base URL of the mail API.
    #[serde(default)]
    pub base_url: String,
    /// Sender address for outgoing mail.
    #[serde(default = "default_sender")]
    pub sender: String,
    /// API authorization token.
    #[serde(default)]
    pub authorization_token: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Whether mail delivery is enabled. When disabled, send requests are
    /// logged and dropped (local development).
    #[serde(default)]
    pub enabled: bool,
}

fn default_sender() -> String {
    "no-reply@shiptrack.local".to_string()
}

fn default_timeout() -> u64 {
    10
}
