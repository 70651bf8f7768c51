//! Cookie authentication middleware.
//!
//! Decodes the access cookie and injects a [`CallerContext`] into request
//! extensions. When the access token has expired but the refresh cookie is
//! still valid, a fresh access cookie is attached to the response (silent
//! refresh); any other failure is a 401.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use shiptrack_auth::jwt::JwtError;
use shiptrack_core::error::AppError;
use shiptrack_service::context::CallerContext;

use crate::cookies::{self, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::state::AppState;

/// Authenticate the request from its cookies.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let access = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::authentication("Access token missing"))?;

    let (claims, refreshed_access) = match state.jwt_decoder.decode_access_token(&access) {
        Ok(claims) => (claims, None),
        Err(JwtError::Expired) => {
            let refresh = jar
                .get(REFRESH_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or_else(|| AppError::authentication("Refresh token missing"))?;

            let claims = state
                .jwt_decoder
                .decode_refresh_token(&refresh)
                .map_err(|_| AppError::authentication("Invalid refresh token"))?;

            let (token, _) = state
                .jwt_encoder
                .generate_access_token(claims.user_id(), &claims.email)?;

            (claims, Some(token))
        }
        Err(e) => return Err(AppError::authentication(e.to_string())),
    };

    let is_admin = claims
        .email
        .eq_ignore_ascii_case(&state.config.auth.admin_email);
    let ctx = CallerContext::new(claims.user_id(), claims.email.clone(), is_admin);
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).await;

    if let Some(token) = refreshed_access {
        let cookie = cookies::access_cookie(&token, &state.config.auth);
        let value = HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| AppError::internal(format!("Invalid cookie header: {e}")))?;
        response.headers_mut().append(SET_COOKIE, value);
    }

    Ok(response)
}
