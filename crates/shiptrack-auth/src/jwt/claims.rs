//! JWT claims structure used in access, refresh, and reset tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// The user's email, the identity every operation authorizes against.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID.
    pub jti: Uuid,
    /// Token type discriminator.
    pub token_type: TokenType,
}

/// Distinguishes the three token purposes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token carried in the `access_token` cookie.
    Access,
    /// Long-lived refresh token carried in the `refresh_token` cookie.
    Refresh,
    /// One-hour password-reset token embedded in the emailed link.
    Reset,
}

impl Claims {
    /// Return the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
