//! Notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use shiptrack_core::error::{AppError, ErrorKind};
use shiptrack_core::result::AppResult;
use shiptrack_core::types::pagination::{PageRequest, PageResponse};
use shiptrack_entity::notification::{Notification, NotificationWithContext};

/// Columns selected when joining notifications with user and shipment
/// summaries.
const WITH_CONTEXT: &str = "n.*, u.email AS user_email, \
     u.first_name AS user_first_name, u.last_name AS user_last_name, \
     s.shipping_id AS shipping_id, s.status AS shipment_status";

/// Repository for notification queries and the viewed-flag update.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a notification by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    /// List all notifications with context, newest first.
    pub async fn find_all(
        &self,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationWithContext>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
            })?;

        let notifications = sqlx::query_as::<_, NotificationWithContext>(&format!(
            "SELECT {WITH_CONTEXT} FROM notifications n \
             JOIN users u ON u.id = n.user_id \
             JOIN shipments s ON s.id = n.shipment_id \
             ORDER BY n.date DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            notifications,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a user's unviewed notifications with context, newest first.
    pub async fn find_unread_by_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<NotificationWithContext>> {
        sqlx::query_as::<_, NotificationWithContext>(&format!(
            "SELECT {WITH_CONTEXT} FROM notifications n \
             JOIN users u ON u.id = n.user_id \
             JOIN shipments s ON s.id = n.shipment_id \
             WHERE n.user_id = $1 AND n.viewed = FALSE \
             ORDER BY n.date DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list unread notifications", e)
        })
    }

    /// List every notification attached to a shipment, oldest first.
    pub async fn find_by_shipment(&self, shipment_id: Uuid) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE shipment_id = $1 ORDER BY date ASC",
        )
        .bind(shipment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list shipment notifications", e)
        })
    }

    /// Mark a notification as viewed, once.
    ///
    /// The update is guarded on ownership and on `viewed = FALSE`; `None`
    /// means no unviewed notification of that user matched.
    pub async fn mark_viewed(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET viewed = TRUE \
             WHERE id = $1 AND user_id = $2 AND viewed = FALSE RETURNING *",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notification viewed", e)
        })
    }
}
