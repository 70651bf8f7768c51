//! Notification listing and the single-shot viewed flag.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shiptrack_core::error::AppError;
use shiptrack_core::types::pagination::{PageRequest, PageResponse};
use shiptrack_database::repositories::notification::NotificationRepository;
use shiptrack_entity::notification::{Notification, NotificationWithContext};

use crate::context::CallerContext;

/// Manages the user notification inbox.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(notification_repo: Arc<NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// List every notification in the system. Admin only.
    pub async fn list_all(
        &self,
        ctx: &CallerContext,
        page: PageRequest,
    ) -> Result<PageResponse<NotificationWithContext>, AppError> {
        if !ctx.is_admin {
            return Err(AppError::authorization(
                "Only admin may access all notifications",
            ));
        }
        self.notification_repo.find_all(&page).await
    }

    /// List the caller's unviewed notifications, newest first.
    pub async fn unread_for_user(
        &self,
        ctx: &CallerContext,
    ) -> Result<Vec<NotificationWithContext>, AppError> {
        self.notification_repo.find_unread_by_user(ctx.user_id).await
    }

    /// Mark one of the caller's notifications as viewed.
    ///
    /// The flag flips exactly once; a second attempt is rejected. Missing
    /// and foreign notifications are reported identically.
    pub async fn mark_viewed(
        &self,
        ctx: &CallerContext,
        notification_id: Uuid,
    ) -> Result<Notification, AppError> {
        let notification = self
            .notification_repo
            .find_by_id(notification_id)
            .await?
            .filter(|n| n.user_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if notification.viewed {
            return Err(AppError::validation("Notification already viewed"));
        }

        let updated = self
            .notification_repo
            .mark_viewed(notification_id, ctx.user_id)
            .await?
            // a racing request flipped the flag between read and write
            .ok_or_else(|| AppError::validation("Notification already viewed"))?;

        info!(notification_id = %updated.id, "Notification marked viewed");
        Ok(updated)
    }
}
