//! Notification event types and their message templates.

use serde::{Deserialize, Serialize};

use crate::shipment::ShipmentStatus;

/// The shipment event a notification announces.
///
/// Each variant carries whatever the template needs; `title` and
/// `description` render the fixed texts shown in the customer's inbox.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A new shipment was placed.
    ShipmentCreated,
    /// An administrator moved the shipment to a new status.
    StatusUpdated(ShipmentStatus),
    /// The owner cancelled a pending shipment.
    ShipmentCancelled,
    /// The owner requested cancellation of an in-flight shipment.
    CancelRequestSubmitted,
    /// The owner toggled the delay flag; carries the new value.
    DelayFlagged(bool),
    /// An administrator force-cancelled the shipment.
    CancelledByAdmin,
}

impl NotificationEvent {
    /// Inbox title for this event.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ShipmentCreated => "Shipment Created",
            Self::StatusUpdated(_) => "Status Updated",
            Self::ShipmentCancelled => "Shipment Cancelled",
            Self::CancelRequestSubmitted => "Cancel Request Submitted",
            Self::DelayFlagged(_) => "Delay Flagged",
            Self::CancelledByAdmin => "Shipment Cancelled by Admin",
        }
    }

    /// Inbox body for this event, naming the shipment.
    pub fn description(&self, shipping_id: &str) -> String {
        match self {
            Self::ShipmentCreated => {
                format!("Shipment #{shipping_id} has been created.")
            }
            Self::StatusUpdated(status) => {
                format!("Shipment #{shipping_id} status changed to {status}.")
            }
            Self::ShipmentCancelled => {
                format!("You have cancelled shipment #{shipping_id}.")
            }
            Self::CancelRequestSubmitted => {
                format!("You have requested cancellation for shipment #{shipping_id}.")
            }
            Self::DelayFlagged(value) => {
                format!("Shipment #{shipping_id} delay flag set to {value}.")
            }
            Self::CancelledByAdmin => {
                format!("Admin cancelled shipment #{shipping_id}.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions_name_the_shipment() {
        let events = [
            NotificationEvent::ShipmentCreated,
            NotificationEvent::StatusUpdated(ShipmentStatus::Shipped),
            NotificationEvent::ShipmentCancelled,
            NotificationEvent::CancelRequestSubmitted,
            NotificationEvent::DelayFlagged(true),
            NotificationEvent::CancelledByAdmin,
        ];
        for event in events {
            assert!(event.description("AB12-XYZ").contains("AB12-XYZ"));
        }
    }

    #[test]
    fn test_status_update_names_new_status() {
        let event = NotificationEvent::StatusUpdated(ShipmentStatus::OnRouteToCollect);
        assert_eq!(
            event.description("AB12-XYZ"),
            "Shipment #AB12-XYZ status changed to ON_ROUTE_TO_COLLECT."
        );
    }

    #[test]
    fn test_delay_flag_names_new_value() {
        assert!(
            NotificationEvent::DelayFlagged(false)
                .description("X")
                .contains("false")
        );
        assert!(
            NotificationEvent::DelayFlagged(true)
                .description("X")
                .contains("true")
        );
    }
}
