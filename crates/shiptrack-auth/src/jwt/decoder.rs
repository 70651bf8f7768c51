//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use shiptrack_core::config::auth::AuthConfig;
use shiptrack_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Why a token failed validation.
///
/// `Expired` is surfaced separately because the auth extractor falls back
/// to the refresh cookie only for expired access tokens, never for
/// malformed or tampered ones.
#[derive(Debug, Error)]
pub enum JwtError {
    /// The token signature was valid but the token has expired.
    #[error("token expired")]
    Expired,
    /// The token is malformed, tampered with, or of the wrong type.
    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        AppError::authentication(err.to_string())
    }
}

/// Validates JWT tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Create a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds, clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_token(token, TokenType::Access)
    }

    /// Decode and validate a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_token(token, TokenType::Refresh)
    }

    /// Decode and validate a password-reset token string.
    pub fn decode_reset_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_token(token, TokenType::Reset)
    }

    fn decode_token(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::Invalid(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.token_type != expected {
            return Err(JwtError::Invalid(format!(
                "wrong token type: expected {expected:?}"
            )));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use shiptrack_core::config::auth::AuthConfig;
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            reset_ttl_hours: 1,
            password_min_length: 8,
            secure_cookies: false,
            admin_email: "admin@shiptrack.local".to_string(),
            admin_password: String::new(),
            client_url: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn test_token_pair_round_trip() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let user_id = Uuid::new_v4();

        let pair = encoder
            .generate_token_pair(user_id, "alice@example.com")
            .unwrap();

        let access = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(access.user_id(), user_id);
        assert_eq!(access.email, "alice@example.com");

        let refresh = decoder.decode_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.user_id(), user_id);
    }

    #[test]
    fn test_token_type_discrimination() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let pair = encoder
            .generate_token_pair(Uuid::new_v4(), "alice@example.com")
            .unwrap();

        // A refresh token must not pass as an access token and vice versa.
        assert!(matches!(
            decoder.decode_access_token(&pair.refresh_token),
            Err(JwtError::Invalid(_))
        ));
        assert!(matches!(
            decoder.decode_refresh_token(&pair.access_token),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_reset_token_round_trip() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let user_id = Uuid::new_v4();

        let token = encoder
            .generate_reset_token(user_id, "alice@example.com")
            .unwrap();
        let claims = decoder.decode_reset_token(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert!(decoder.decode_access_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let pair = encoder
            .generate_token_pair(Uuid::new_v4(), "alice@example.com")
            .unwrap();

        let mut tampered = pair.access_token.clone();
        tampered.push('x');
        assert!(matches!(
            decoder.decode_access_token(&tampered),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&test_config());
        let mut other = test_config();
        other.jwt_secret = "different-secret".to_string();
        let decoder = JwtDecoder::new(&other);

        let pair = encoder
            .generate_token_pair(Uuid::new_v4(), "alice@example.com")
            .unwrap();
        assert!(decoder.decode_access_token(&pair.access_token).is_err());
    }
}
