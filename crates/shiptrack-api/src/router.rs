//! Route definitions for the ShipTrack HTTP API.
//!
//! Auth routes mirror the original client contract under `/auth`; shipment
//! and notification routes live under `/ship` with separate admin and user
//! path families. Everything except signup/login/password-recovery and the
//! health check sits behind the cookie auth middleware.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/auth/forgot-password",
            post(handlers::auth::forgot_password),
        )
        .route("/auth/reset-password", post(handlers::auth::reset_password))
        .route("/health", get(handlers::health::health));

    let protected_routes = Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/profile", get(handlers::auth::profile))
        .merge(shipment_routes())
        .merge(notification_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

/// Shipment endpoints: creation plus the admin and user path families.
fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/ship/shipments", post(handlers::shipment::create))
        .route(
            "/ship/admin/shipments",
            get(handlers::shipment::admin_list),
        )
        .route(
            "/ship/admin/shipments/{id}",
            get(handlers::shipment::admin_get).delete(handlers::shipment::force_cancel),
        )
        .route(
            "/ship/admin/shipments/status/{id}",
            patch(handlers::shipment::update_status),
        )
        .route("/ship/users/shipments", get(handlers::shipment::user_list))
        .route(
            "/ship/users/shipments/{id}",
            get(handlers::shipment::user_get),
        )
        .route(
            "/ship/users/shipments/cancel/{id}",
            patch(handlers::shipment::cancel),
        )
        .route(
            "/ship/users/shipments/delay/{id}",
            patch(handlers::shipment::toggle_delay),
        )
}

/// Notification endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ship/admin/notifications",
            get(handlers::notification::admin_list),
        )
        .route(
            "/ship/users/notifications",
            get(handlers::notification::user_unread),
        )
        .route(
            "/ship/users/notifications/{id}",
            patch(handlers::notification::mark_viewed),
        )
}
