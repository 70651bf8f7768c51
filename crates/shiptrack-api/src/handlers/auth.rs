//! Auth handlers — signup, login, logout, profile, password recovery.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use shiptrack_core::error::AppError;
use shiptrack_service::account::RegisterRequest;

use crate::cookies::{self, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SignupRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> Result<(CookieJar, (StatusCode, Json<ApiResponse<UserResponse>>)), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, tokens) = state
        .account_service
        .register(RegisterRequest {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            address: req.address,
            telephone: req.telephone,
            password: req.password,
        })
        .await?;

    let jar = jar
        .add(cookies::access_cookie(&tokens.access_token, &state.config.auth))
        .add(cookies::refresh_cookie(&tokens.refresh_token, &state.config.auth));

    Ok((
        jar,
        (
            StatusCode::CREATED,
            Json(ApiResponse::ok(UserResponse::from(user))),
        ),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponse>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, tokens) = state.account_service.login(&req.email, &req.password).await?;

    let jar = jar
        .add(cookies::access_cookie(&tokens.access_token, &state.config.auth))
        .add(cookies::refresh_cookie(&tokens.refresh_token, &state.config.auth));

    Ok((jar, Json(ApiResponse::ok(UserResponse::from(user)))))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    _auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), AppError> {
    let jar = jar
        .add(cookies::removal_cookie(ACCESS_COOKIE, &state.config.auth))
        .add(cookies::removal_cookie(REFRESH_COOKIE, &state.config.auth));

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse::new("Logout successful"))),
    ))
}

/// GET /auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.account_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// POST /auth/forgot-password
///
/// Always replies with the same neutral message so the endpoint cannot be
/// used to probe for accounts.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.account_service.forgot_password(&req.email).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "If that email is in our system, you'll receive a reset link",
    ))))
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .account_service
        .reset_password(&req.token, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password updated successfully",
    ))))
}
