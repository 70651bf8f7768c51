//! Shipment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ShipmentStatus;

/// A shipment record.
///
/// Externally addressed by `shipping_id`; the numeric row key never leaves
/// the persistence layer. Status changes go exclusively through the
/// lifecycle engine, which stamps the matching date column the first time
/// each status is entered.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shipment {
    /// Unique shipment identifier (internal).
    pub id: Uuid,
    /// Human-readable public identifier, immutable after creation.
    pub shipping_id: String,
    /// The owning user.
    pub user_id: Uuid,
    /// Pickup address.
    pub sender_address: String,
    /// Receiver first name.
    pub receiver_first_name: String,
    /// Receiver last name.
    pub receiver_last_name: String,
    /// Delivery address.
    pub receiver_address: String,
    /// Receiver telephone number.
    pub receiver_telephone: String,
    /// Parcel weight in kilograms.
    pub weight: f64,
    /// Current lifecycle status.
    pub status: ShipmentStatus,
    /// Whether the owner has requested cancellation while not eligible for
    /// immediate cancel.
    pub request_cancel: bool,
    /// User-toggleable delay signal.
    pub delay_flag: bool,
    /// When the shipment was placed. Immutable.
    pub placed_date: DateTime<Utc>,
    /// When the parcel was collected.
    pub collected_date: Option<DateTime<Utc>>,
    /// When the parcel entered transit.
    pub shipped_date: Option<DateTime<Utc>>,
    /// When the parcel was delivered.
    pub completed_date: Option<DateTime<Utc>>,
    /// When the shipment was canceled.
    pub canceled_date: Option<DateTime<Utc>>,
}

/// A shipment row joined with a summary of its owning user.
///
/// Read model for listing and detail queries; admins see every owner,
/// regular users only ever see themselves here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShipmentWithOwner {
    /// The shipment record.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub shipment: Shipment,
    /// Owner email.
    pub owner_email: String,
    /// Owner first name.
    pub owner_first_name: String,
    /// Owner last name.
    pub owner_last_name: String,
}

/// Data required to create a new shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShipment {
    /// Public shipping identifier (generated by the service layer).
    pub shipping_id: String,
    /// The owning user.
    pub user_id: Uuid,
    /// Pickup address.
    pub sender_address: String,
    /// Receiver first name.
    pub receiver_first_name: String,
    /// Receiver last name.
    pub receiver_last_name: String,
    /// Delivery address.
    pub receiver_address: String,
    /// Receiver telephone number.
    pub receiver_telephone: String,
    /// Parcel weight in kilograms.
    pub weight: f64,
}
