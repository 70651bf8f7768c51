//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Password-reset token TTL in hours.
    #[serde(default = "default_reset_ttl")]
    pub reset_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Whether auth cookies carry the `Secure` attribute.
    #[serde(default)]
    pub secure_cookies: bool,
    /// The sole administrator account email.
    pub admin_email: String,
    /// Initial administrator password, used only when seeding the account.
    #[serde(default)]
    pub admin_password: String,
    /// Base URL of the browser client, used to build reset links.
    #[serde(default = "default_client_url")]
    pub client_url: String,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_reset_ttl() -> u64 {
    1
}

fn default_password_min() -> usize {
    8
}

fn default_client_url() -> String {
    "http://localhost:3000".to_string()
}
