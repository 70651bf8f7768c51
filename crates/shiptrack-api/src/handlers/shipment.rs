//! Shipment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use shiptrack_core::error::AppError;
use shiptrack_core::types::pagination::PageResponse;
use shiptrack_entity::shipment::{Shipment, ShipmentStatus, ShipmentWithOwner};
use shiptrack_service::shipment::{CreateShipmentRequest as CreateShipment, ShipmentDetail};

use crate::dto::request::{CreateShipmentRequest, UpdateStatusRequest};
use crate::dto::response::{ApiResponse, DelayFlagResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /ship/shipments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Shipment>>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let shipment = state
        .shipment_service
        .create(
            &auth,
            CreateShipment {
                user_email: req.user_email,
                sender_address: req.sender_address,
                receiver_first_name: req.receiver_first_name,
                receiver_last_name: req.receiver_last_name,
                receiver_address: req.receiver_address,
                receiver_telephone: req.receiver_telephone,
                weight: req.weight,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(shipment))))
}

/// GET /ship/admin/shipments
pub async fn admin_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ShipmentWithOwner>>>, AppError> {
    let page = state
        .shipment_service
        .list_all(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /ship/users/shipments
pub async fn user_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ShipmentWithOwner>>>, AppError> {
    let page = state
        .shipment_service
        .list_own(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /ship/admin/shipments/{id}
pub async fn admin_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shipping_id): Path<String>,
) -> Result<Json<ApiResponse<ShipmentDetail>>, AppError> {
    let detail = state.shipment_service.get_any(&auth, &shipping_id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// GET /ship/users/shipments/{id}
pub async fn user_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shipping_id): Path<String>,
) -> Result<Json<ApiResponse<ShipmentDetail>>, AppError> {
    let detail = state.shipment_service.get(&auth, &shipping_id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PATCH /ship/admin/shipments/status/{id}
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shipping_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Shipment>>, AppError> {
    let requested: ShipmentStatus = req.status.parse()?;

    let shipment = state
        .shipment_service
        .transition(&auth, &shipping_id, requested)
        .await?;

    Ok(Json(ApiResponse::ok(shipment)))
}

/// PATCH /ship/users/shipments/cancel/{id}
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shipping_id): Path<String>,
) -> Result<Json<ApiResponse<Shipment>>, AppError> {
    let shipment = state
        .shipment_service
        .request_or_execute_cancel(&auth, &shipping_id)
        .await?;
    Ok(Json(ApiResponse::ok(shipment)))
}

/// PATCH /ship/users/shipments/delay/{id}
pub async fn toggle_delay(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shipping_id): Path<String>,
) -> Result<Json<ApiResponse<DelayFlagResponse>>, AppError> {
    let shipment = state
        .shipment_service
        .toggle_delay(&auth, &shipping_id)
        .await?;

    Ok(Json(ApiResponse::ok(DelayFlagResponse {
        shipping_id: shipment.shipping_id,
        delay_flag: shipment.delay_flag,
    })))
}

/// DELETE /ship/admin/shipments/{id}
pub async fn force_cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shipping_id): Path<String>,
) -> Result<Json<ApiResponse<Shipment>>, AppError> {
    let shipment = state
        .shipment_service
        .force_cancel(&auth, &shipping_id)
        .await?;
    Ok(Json(ApiResponse::ok(shipment)))
}
