//! Shipment status enumeration and the legal-transition table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a shipment.
///
/// `Pending` is the initial state; `Completed` and `Canceled` are terminal.
/// Wire and database spelling is SCREAMING_SNAKE_CASE (`ON_ROUTE_TO_COLLECT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "shipment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    /// Placed by the customer, not yet picked up.
    Pending,
    /// A courier is on the way to collect the parcel.
    OnRouteToCollect,
    /// The parcel has been collected from the sender.
    Collected,
    /// The parcel is in transit to the receiver.
    Shipped,
    /// Delivered; no further changes allowed.
    Completed,
    /// Canceled by the customer or an administrator; no further changes allowed.
    Canceled,
}

impl ShipmentStatus {
    /// Statuses reachable from this one in a single transition.
    pub fn allowed_transitions(&self) -> &'static [ShipmentStatus] {
        match self {
            Self::Pending => &[Self::OnRouteToCollect, Self::Canceled],
            Self::OnRouteToCollect => &[Self::Collected, Self::Canceled],
            Self::Collected => &[Self::Shipped, Self::Canceled],
            Self::Shipped => &[Self::Completed, Self::Canceled],
            Self::Completed | Self::Canceled => &[],
        }
    }

    /// Check whether a single transition to `target` is legal.
    ///
    /// A no-op (target equals self) is not a legal transition; callers
    /// distinguish it for error reporting.
    pub fn can_transition_to(&self, target: ShipmentStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Check whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// The shipment date column stamped the first time a shipment enters
    /// this status. `Pending` is stamped at creation (`placed_date`) and
    /// `OnRouteToCollect` has no dedicated column, so neither maps here.
    pub fn date_column(&self) -> Option<&'static str> {
        match self {
            Self::Pending | Self::OnRouteToCollect => None,
            Self::Collected => Some("collected_date"),
            Self::Shipped => Some("shipped_date"),
            Self::Completed => Some("completed_date"),
            Self::Canceled => Some("canceled_date"),
        }
    }

    /// Return the status in wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::OnRouteToCollect => "ON_ROUTE_TO_COLLECT",
            Self::Collected => "COLLECTED",
            Self::Shipped => "SHIPPED",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = shiptrack_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ON_ROUTE_TO_COLLECT" => Ok(Self::OnRouteToCollect),
            "COLLECTED" => Ok(Self::Collected),
            "SHIPPED" => Ok(Self::Shipped),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(shiptrack_core::AppError::validation(format!(
                "Invalid status value: '{s}'"
            ))),
        }
    }
}
