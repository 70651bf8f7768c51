//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use shiptrack_auth::jwt::{JwtDecoder, JwtEncoder};
use shiptrack_core::config::AppConfig;
use shiptrack_service::account::AccountService;
use shiptrack_service::notification::NotificationService;
use shiptrack_service::shipment::ShipmentService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Shipment lifecycle service.
    pub shipment_service: Arc<ShipmentService>,
    /// Notification inbox service.
    pub notification_service: Arc<NotificationService>,
    /// Account service.
    pub account_service: Arc<AccountService>,
}
