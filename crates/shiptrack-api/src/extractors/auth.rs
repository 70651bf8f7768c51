//! `AuthUser` extractor — surfaces the caller context injected by the
//! auth middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use shiptrack_core::error::AppError;
use shiptrack_service::context::CallerContext;

use crate::state::AppState;

/// Extracted authenticated caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CallerContext);

impl AuthUser {
    /// Return the inner `CallerContext`.
    pub fn context(&self) -> &CallerContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = CallerContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::authentication("Not authenticated"))
    }
}
