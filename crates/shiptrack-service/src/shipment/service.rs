//! The shipment lifecycle engine.
//!
//! Owns the status state machine, the timestamp-stamping policy, and the
//! notification side effect. Validation happens against a freshly read
//! row; the write itself is a conditional update paired with the
//! notification insert in one transaction, so a lost race never produces
//! a partial or duplicate change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use shiptrack_core::error::AppError;
use shiptrack_core::types::pagination::{PageRequest, PageResponse};
use shiptrack_database::repositories::notification::NotificationRepository;
use shiptrack_database::repositories::shipment::ShipmentRepository;
use shiptrack_database::repositories::user::UserRepository;
use shiptrack_entity::notification::{Notification, NotificationEvent};
use shiptrack_entity::shipment::{CreateShipment, Shipment, ShipmentStatus, ShipmentWithOwner};

use crate::context::CallerContext;
use crate::shipment::shipping_id;

/// How many shipping IDs to try before giving up on a conflict streak.
const MAX_ID_ATTEMPTS: usize = 5;

/// Drives the shipment status state machine and its notification side
/// effects.
#[derive(Debug, Clone)]
pub struct ShipmentService {
    /// Shipment repository.
    shipment_repo: Arc<ShipmentRepository>,
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
}

/// Request to create a new shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShipmentRequest {
    /// Email of the account the shipment belongs to.
    pub user_email: String,
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

/// A shipment with its owner summary and full notification history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentDetail {
    /// The shipment and its owner.
    #[serde(flatten)]
    pub shipment: ShipmentWithOwner,
    /// Notifications attached to the shipment, oldest first.
    pub notifications: Vec<Notification>,
}

impl ShipmentService {
    /// Create a new shipment service.
    pub fn new(
        shipment_repo: Arc<ShipmentRepository>,
        notification_repo: Arc<NotificationRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            shipment_repo,
            notification_repo,
            user_repo,
        }
    }

    /// Create a new shipment owned by the caller.
    ///
    /// The payload owner email must match the authenticated caller. The
    /// shipment starts `PENDING` with `placed_date = now`; the creation
    /// notification is written in the same transaction.
    pub async fn create(
        &self,
        ctx: &CallerContext,
        req: CreateShipmentRequest,
    ) -> Result<Shipment, AppError> {
        if req.weight <= 0.0 {
            return Err(AppError::validation("Weight must be positive"));
        }

        let user = self
            .user_repo
            .find_by_email(&req.user_email)
            .await?
            .ok_or_else(|| AppError::not_found("No such user"))?;

        if !user.email.eq_ignore_ascii_case(&ctx.email) {
            return Err(AppError::authorization(
                "Cannot create shipment for another user",
            ));
        }

        let event = NotificationEvent::ShipmentCreated;

        // The generated ID is unique with overwhelming probability; the
        // unique constraint catches the rest and we retry with a new one.
        let mut last_err = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let data = CreateShipment {
                shipping_id: shipping_id::generate(),
                user_id: user.id,
                sender_address: req.sender_address.clone(),
                receiver_first_name: req.receiver_first_name.clone(),
                receiver_last_name: req.receiver_last_name.clone(),
                receiver_address: req.receiver_address.clone(),
                receiver_telephone: req.receiver_telephone.clone(),
                weight: req.weight,
            };

            match self
                .shipment_repo
                .create_with_notification(
                    &data,
                    event.title(),
                    &event.description(&data.shipping_id),
                )
                .await
            {
                Ok(shipment) => {
                    info!(
                        shipping_id = %shipment.shipping_id,
                        user = %user.email,
                        "Shipment created"
                    );
                    return Ok(shipment);
                }
                Err(e) if e.kind == shiptrack_core::error::ErrorKind::Conflict => {
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| AppError::internal("Failed to generate shipping ID")))
    }

    /// Apply an administrator-driven status transition.
    ///
    /// Rejects non-admin callers, unknown shipments, no-op targets, and
    /// edges outside the transition table. On acceptance exactly one
    /// status mutation and one notification are recorded.
    pub async fn transition(
        &self,
        ctx: &CallerContext,
        shipping_id: &str,
        requested: ShipmentStatus,
    ) -> Result<Shipment, AppError> {
        if !ctx.is_admin {
            return Err(AppError::authorization(
                "Only admins may update shipment status",
            ));
        }

        let shipment = self
            .shipment_repo
            .find_by_shipping_id(shipping_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shipment {shipping_id} not found")))?;

        if shipment.status == requested {
            return Err(AppError::validation(format!(
                "Shipment is already {requested}"
            )));
        }

        if !shipment.status.can_transition_to(requested) {
            return Err(AppError::validation(format!(
                "Cannot change status from {} to {}",
                shipment.status, requested
            )));
        }

        let event = NotificationEvent::StatusUpdated(requested);
        let updated = self
            .shipment_repo
            .transition_with_notification(
                shipping_id,
                shipment.status,
                requested,
                event.title(),
                &event.description(shipping_id),
            )
            .await?
            .ok_or_else(|| {
                AppError::conflict("Shipment was modified concurrently; retry the update")
            })?;

        info!(
            shipping_id = %updated.shipping_id,
            from = %shipment.status,
            to = %updated.status,
            "Shipment status updated"
        );

        Ok(updated)
    }

    /// Cancel a pending shipment, or record a cancellation request on an
    /// in-flight one.
    ///
    /// The caller must own the shipment; non-owned and missing shipments
    /// are indistinguishable.
    pub async fn request_or_execute_cancel(
        &self,
        ctx: &CallerContext,
        shipping_id: &str,
    ) -> Result<Shipment, AppError> {
        let shipment = self.find_owned(ctx, shipping_id).await?;

        match shipment.status {
            ShipmentStatus::Pending => {
                let event = NotificationEvent::ShipmentCancelled;
                let updated = self
                    .shipment_repo
                    .transition_with_notification(
                        shipping_id,
                        ShipmentStatus::Pending,
                        ShipmentStatus::Canceled,
                        event.title(),
                        &event.description(shipping_id),
                    )
                    .await?
                    .ok_or_else(|| {
                        AppError::conflict("Shipment was modified concurrently; retry the cancel")
                    })?;

                info!(shipping_id = %updated.shipping_id, "Shipment cancelled by owner");
                Ok(updated)
            }
            ShipmentStatus::Canceled => Err(AppError::validation("Shipment is already CANCELED")),
            ShipmentStatus::Completed => Err(AppError::validation(
                "Cannot request cancellation for a completed shipment",
            )),
            _ => {
                let event = NotificationEvent::CancelRequestSubmitted;
                let updated = self
                    .shipment_repo
                    .request_cancel_with_notification(
                        shipment.id,
                        event.title(),
                        &event.description(shipping_id),
                    )
                    .await?;

                info!(shipping_id = %updated.shipping_id, "Cancel request submitted");
                Ok(updated)
            }
        }
    }

    /// Toggle the delay flag on an owned shipment.
    pub async fn toggle_delay(
        &self,
        ctx: &CallerContext,
        shipping_id: &str,
    ) -> Result<Shipment, AppError> {
        let shipment = self.find_owned(ctx, shipping_id).await?;

        let event = NotificationEvent::DelayFlagged(!shipment.delay_flag);
        let updated = self
            .shipment_repo
            .toggle_delay_with_notification(
                shipment.id,
                shipment.delay_flag,
                event.title(),
                &event.description(shipping_id),
            )
            .await?
            .ok_or_else(|| {
                AppError::conflict("Shipment was modified concurrently; retry the toggle")
            })?;

        info!(
            shipping_id = %updated.shipping_id,
            delay_flag = updated.delay_flag,
            "Delay flag toggled"
        );

        Ok(updated)
    }

    /// Administrator force-cancel, bypassing the transition table.
    pub async fn force_cancel(
        &self,
        ctx: &CallerContext,
        shipping_id: &str,
    ) -> Result<Shipment, AppError> {
        if !ctx.is_admin {
            return Err(AppError::authorization("Only admins may cancel shipments"));
        }

        let shipment = self
            .shipment_repo
            .find_by_shipping_id(shipping_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shipment {shipping_id} not found")))?;

        if shipment.status == ShipmentStatus::Canceled {
            return Err(AppError::validation("Shipment is already CANCELED"));
        }

        let event = NotificationEvent::CancelledByAdmin;
        let updated = self
            .shipment_repo
            .force_cancel_with_notification(
                shipping_id,
                event.title(),
                &event.description(shipping_id),
            )
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shipment {shipping_id} not found")))?;

        info!(shipping_id = %updated.shipping_id, "Shipment cancelled by admin");
        Ok(updated)
    }

    /// List every shipment in the system. Admin only.
    pub async fn list_all(
        &self,
        ctx: &CallerContext,
        page: PageRequest,
    ) -> Result<PageResponse<ShipmentWithOwner>, AppError> {
        if !ctx.is_admin {
            return Err(AppError::authorization(
                "Only admin has access to all shipments",
            ));
        }
        self.shipment_repo.find_all(&page).await
    }

    /// List the caller's own shipments.
    pub async fn list_own(
        &self,
        ctx: &CallerContext,
        page: PageRequest,
    ) -> Result<PageResponse<ShipmentWithOwner>, AppError> {
        self.shipment_repo.find_by_user(ctx.user_id, &page).await
    }

    /// Fetch any shipment with its notification history. Admin only.
    pub async fn get_any(
        &self,
        ctx: &CallerContext,
        shipping_id: &str,
    ) -> Result<ShipmentDetail, AppError> {
        if !ctx.is_admin {
            return Err(AppError::authorization(
                "Only admin has access to any shipment",
            ));
        }

        let shipment = self
            .shipment_repo
            .find_with_owner(shipping_id)
            .await?
            .ok_or_else(|| AppError::not_found("Shipment not found"))?;

        self.detail(shipment).await
    }

    /// Fetch one shipment with its notification history.
    ///
    /// Admins may fetch any shipment; other callers only their own, with
    /// missing and non-owned reported identically.
    pub async fn get(
        &self,
        ctx: &CallerContext,
        shipping_id: &str,
    ) -> Result<ShipmentDetail, AppError> {
        let shipment = self
            .shipment_repo
            .find_with_owner(shipping_id)
            .await?
            .filter(|s| ctx.is_admin || s.shipment.user_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Shipment not found"))?;

        self.detail(shipment).await
    }

    /// Attach the notification history to a shipment read model.
    async fn detail(&self, shipment: ShipmentWithOwner) -> Result<ShipmentDetail, AppError> {
        let notifications = self
            .notification_repo
            .find_by_shipment(shipment.shipment.id)
            .await?;

        Ok(ShipmentDetail {
            shipment,
            notifications,
        })
    }

    /// Read an owned shipment, reporting missing and non-owned alike.
    async fn find_owned(
        &self,
        ctx: &CallerContext,
        shipping_id: &str,
    ) -> Result<Shipment, AppError> {
        self.shipment_repo
            .find_by_shipping_id(shipping_id)
            .await?
            .filter(|s| s.user_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Shipment not found"))
    }
}
