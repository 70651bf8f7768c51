//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shipment::ShipmentStatus;

/// An inbox entry delivered to a user about one of their shipments.
///
/// Immutable once written except for the `viewed` flag, which flips to
/// `true` exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// The shipment this notification refers to.
    pub shipment_id: Uuid,
    /// Short title.
    pub title: String,
    /// Body text.
    pub description: String,
    /// When the notification was created.
    pub date: DateTime<Utc>,
    /// Whether the recipient has viewed this notification.
    pub viewed: bool,
}

/// A notification joined with summaries of its user and shipment.
///
/// Read model for the inbox and admin listing queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationWithContext {
    /// The notification record.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub notification: Notification,
    /// Recipient email.
    pub user_email: String,
    /// Recipient first name.
    pub user_first_name: String,
    /// Recipient last name.
    pub user_last_name: String,
    /// Public identifier of the referenced shipment.
    pub shipping_id: String,
    /// Current status of the referenced shipment.
    pub shipment_status: ShipmentStatus,
}
