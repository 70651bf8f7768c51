//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use shiptrack_core::error::AppError;
use shiptrack_core::types::pagination::PageResponse;
use shiptrack_entity::notification::{Notification, NotificationWithContext};

use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /ship/admin/notifications
pub async fn admin_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<NotificationWithContext>>>, AppError> {
    let page = state
        .notification_service
        .list_all(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /ship/users/notifications
pub async fn user_unread(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<NotificationWithContext>>>, AppError> {
    let unread = state.notification_service.unread_for_user(&auth).await?;
    Ok(Json(ApiResponse::ok(unread)))
}

/// PATCH /ship/users/notifications/{id}
pub async fn mark_viewed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, AppError> {
    let notification = state
        .notification_service
        .mark_viewed(&auth, notification_id)
        .await?;
    Ok(Json(ApiResponse::ok(notification)))
}
