//! Account use cases: signup, login, profile, and password recovery.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use shiptrack_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use shiptrack_auth::password::PasswordHasher;
use shiptrack_core::config::auth::AuthConfig;
use shiptrack_core::error::AppError;
use shiptrack_database::repositories::user::UserRepository;
use shiptrack_entity::user::{CreateUser, User};

use crate::context::CallerContext;
use crate::mailer::Mailer;

/// Handles account lifecycle operations.
#[derive(Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// JWT encoder for issuing token pairs and reset tokens.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for reset tokens.
    jwt_decoder: Arc<JwtDecoder>,
    /// Mail client for reset links.
    mailer: Arc<dyn Mailer>,
    /// Auth configuration (admin identity, client URL, password policy).
    auth: AuthConfig,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

/// Data for registering a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Telephone number.
    pub telephone: String,
    /// Plaintext password.
    pub password: String,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        mailer: Arc<dyn Mailer>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            jwt_encoder,
            jwt_decoder,
            mailer,
            auth,
        }
    }

    /// Register a new account and issue its first token pair.
    pub async fn register(&self, req: RegisterRequest) -> Result<(User, TokenPair), AppError> {
        for (field, value) in [
            ("firstName", &req.first_name),
            ("lastName", &req.last_name),
            ("email", &req.email),
            ("address", &req.address),
            ("telephone", &req.telephone),
            ("password", &req.password),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("Field '{field}' is required")));
            }
        }

        if req.password.len() < self.auth.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth.password_min_length
            )));
        }

        if self.user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                address: req.address,
                telephone: req.telephone,
                password_hash,
            })
            .await?;

        let tokens = self.jwt_encoder.generate_token_pair(user.id, &user.email)?;

        info!(user = %user.email, "Account created");
        Ok((user, tokens))
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Unknown email and wrong password produce the same error so callers
    /// cannot probe for accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, TokenPair), AppError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Err(AppError::authentication("Invalid credentials"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid credentials"));
        }

        info!(user = %user.email, "Login successful");
        let tokens = self.jwt_encoder.generate_token_pair(user.id, &user.email)?;
        Ok((user, tokens))
    }

    /// Fetch the caller's profile.
    pub async fn profile(&self, ctx: &CallerContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Send a password-reset link if the account exists.
    ///
    /// Always succeeds from the caller's perspective; delivery failures
    /// are logged, never surfaced, so the response leaks nothing.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Ok(());
        };

        let token = self.jwt_encoder.generate_reset_token(user.id, &user.email)?;
        let reset_url = format!("{}/reset-password?token={token}", self.auth.client_url);
        let body = format!(
            "<p>You requested a password reset. Click the link below to choose a new password:</p>\
             <a href=\"{reset_url}\">{reset_url}</a>\
             <p>This link will expire in {} hour(s).</p>",
            self.auth.reset_ttl_hours
        );

        if let Err(e) = self
            .mailer
            .send(&user.email, "Password Reset Request", &body)
            .await
        {
            warn!(user = %user.email, error = %e, "Failed to send reset email");
        }

        Ok(())
    }

    /// Set a new password using a reset token from the emailed link.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let claims = self.jwt_decoder.decode_reset_token(token)?;

        if new_password.len() < self.auth.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(new_password)?;
        self.user_repo
            .update_password(claims.user_id(), &password_hash)
            .await?;

        info!(user = %claims.email, "Password reset");
        Ok(())
    }

    /// Seed the administrator account on startup if it does not exist.
    pub async fn seed_admin(&self) -> Result<(), AppError> {
        if self.auth.admin_email.is_empty() || self.auth.admin_password.is_empty() {
            warn!("admin_email or admin_password not set; skipping admin seed");
            return Ok(());
        }

        if self
            .user_repo
            .find_by_email(&self.auth.admin_email)
            .await?
            .is_some()
        {
            info!(email = %self.auth.admin_email, "Admin user already exists");
            return Ok(());
        }

        let password_hash = self.hasher.hash_password(&self.auth.admin_password)?;
        self.user_repo
            .create(&CreateUser {
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                email: self.auth.admin_email.clone(),
                address: String::new(),
                telephone: String::new(),
                password_hash,
            })
            .await?;

        info!(email = %self.auth.admin_email, "Seeded admin user");
        Ok(())
    }
}
