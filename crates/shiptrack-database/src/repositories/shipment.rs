//! Shipment repository implementation.
//!
//! Every status-affecting write pairs the shipment UPDATE with the
//! notification INSERT in one transaction, and guards the UPDATE with the
//! previously observed state so that concurrent requests cannot both win
//! the same logical change.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use shiptrack_core::error::{AppError, ErrorKind};
use shiptrack_core::result::AppResult;
use shiptrack_core::types::pagination::{PageRequest, PageResponse};
use shiptrack_entity::shipment::{CreateShipment, Shipment, ShipmentStatus, ShipmentWithOwner};

/// Columns selected when joining shipments with their owner summary.
const WITH_OWNER: &str = "s.*, u.email AS owner_email, \
     u.first_name AS owner_first_name, u.last_name AS owner_last_name";

/// Repository for shipment CRUD, listing, and transactional status writes.
#[derive(Debug, Clone)]
pub struct ShipmentRepository {
    pool: PgPool,
}

impl ShipmentRepository {
    /// Create a new shipment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a shipment by its public shipping ID.
    pub async fn find_by_shipping_id(&self, shipping_id: &str) -> AppResult<Option<Shipment>> {
        sqlx::query_as::<_, Shipment>("SELECT * FROM shipments WHERE shipping_id = $1")
            .bind(shipping_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find shipment", e)
            })
    }

    /// Find a shipment with its owner summary by shipping ID.
    pub async fn find_with_owner(&self, shipping_id: &str) -> AppResult<Option<ShipmentWithOwner>> {
        sqlx::query_as::<_, ShipmentWithOwner>(&format!(
            "SELECT {WITH_OWNER} FROM shipments s \
             JOIN users u ON u.id = s.user_id WHERE s.shipping_id = $1"
        ))
        .bind(shipping_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find shipment", e))
    }

    /// List all shipments with owner summaries, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<ShipmentWithOwner>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shipments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count shipments", e)
            })?;

        let shipments = sqlx::query_as::<_, ShipmentWithOwner>(&format!(
            "SELECT {WITH_OWNER} FROM shipments s \
             JOIN users u ON u.id = s.user_id \
             ORDER BY s.placed_date DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shipments", e))?;

        Ok(PageResponse::new(
            shipments,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List one user's shipments with owner summaries, newest first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShipmentWithOwner>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shipments WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count shipments", e)
            })?;

        let shipments = sqlx::query_as::<_, ShipmentWithOwner>(&format!(
            "SELECT {WITH_OWNER} FROM shipments s \
             JOIN users u ON u.id = s.user_id WHERE s.user_id = $1 \
             ORDER BY s.placed_date DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shipments", e))?;

        Ok(PageResponse::new(
            shipments,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new shipment and its creation notification in one
    /// transaction.
    ///
    /// Fails with `Conflict` when the generated shipping ID collides with
    /// an existing row; the caller regenerates and retries.
    pub async fn create_with_notification(
        &self,
        data: &CreateShipment,
        title: &str,
        description: &str,
    ) -> AppResult<Shipment> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let shipment = sqlx::query_as::<_, Shipment>(
            "INSERT INTO shipments (shipping_id, user_id, sender_address, \
                 receiver_first_name, receiver_last_name, receiver_address, \
                 receiver_telephone, weight) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&data.shipping_id)
        .bind(data.user_id)
        .bind(&data.sender_address)
        .bind(&data.receiver_first_name)
        .bind(&data.receiver_last_name)
        .bind(&data.receiver_address)
        .bind(&data.receiver_telephone)
        .bind(data.weight)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("shipments_shipping_id_key") =>
            {
                AppError::conflict(format!(
                    "Shipping ID '{}' already exists",
                    data.shipping_id
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create shipment", e),
        })?;

        insert_notification(&mut tx, shipment.user_id, shipment.id, title, description).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(shipment)
    }

    /// Apply a status transition guarded by the expected current status,
    /// stamping the destination's date column (first time only) and
    /// inserting the notification, all in one transaction.
    ///
    /// Returns `None` when no row matched — the shipment is gone or its
    /// status changed since it was read.
    pub async fn transition_with_notification(
        &self,
        shipping_id: &str,
        expected: ShipmentStatus,
        new_status: ShipmentStatus,
        title: &str,
        description: &str,
    ) -> AppResult<Option<Shipment>> {
        // date_column() yields fixed identifiers, never caller input
        let sql = match new_status.date_column() {
            Some(col) => format!(
                "UPDATE shipments SET status = $1, {col} = COALESCE({col}, NOW()) \
                 WHERE shipping_id = $2 AND status = $3 RETURNING *"
            ),
            None => "UPDATE shipments SET status = $1 \
                 WHERE shipping_id = $2 AND status = $3 RETURNING *"
                .to_string(),
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query_as::<_, Shipment>(&sql)
            .bind(new_status)
            .bind(shipping_id)
            .bind(expected)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update status", e)
            })?;

        let Some(shipment) = updated else {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(None);
        };

        insert_notification(&mut tx, shipment.user_id, shipment.id, title, description).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(Some(shipment))
    }

    /// Cancel a shipment regardless of its current status (administrator
    /// escape hatch), stamping `canceled_date` only on first entry.
    pub async fn force_cancel_with_notification(
        &self,
        shipping_id: &str,
        title: &str,
        description: &str,
    ) -> AppResult<Option<Shipment>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query_as::<_, Shipment>(
            "UPDATE shipments SET status = 'CANCELED', \
                 canceled_date = COALESCE(canceled_date, NOW()) \
             WHERE shipping_id = $1 RETURNING *",
        )
        .bind(shipping_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel shipment", e))?;

        let Some(shipment) = updated else {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(None);
        };

        insert_notification(&mut tx, shipment.user_id, shipment.id, title, description).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(Some(shipment))
    }

    /// Record a cancellation request on an in-flight shipment without
    /// changing its status, together with the notification.
    pub async fn request_cancel_with_notification(
        &self,
        shipment_id: Uuid,
        title: &str,
        description: &str,
    ) -> AppResult<Shipment> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let shipment = sqlx::query_as::<_, Shipment>(
            "UPDATE shipments SET request_cancel = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(shipment_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record cancel request", e)
        })?
        .ok_or_else(|| AppError::not_found("Shipment not found"))?;

        insert_notification(&mut tx, shipment.user_id, shipment.id, title, description).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(shipment)
    }

    /// Flip the delay flag, guarded by the previously observed value so
    /// the notification text always matches the stored result.
    ///
    /// Returns `None` when the flag changed since it was read.
    pub async fn toggle_delay_with_notification(
        &self,
        shipment_id: Uuid,
        expected_flag: bool,
        title: &str,
        description: &str,
    ) -> AppResult<Option<Shipment>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query_as::<_, Shipment>(
            "UPDATE shipments SET delay_flag = NOT delay_flag \
             WHERE id = $1 AND delay_flag = $2 RETURNING *",
        )
        .bind(shipment_id)
        .bind(expected_flag)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle delay flag", e))?;

        let Some(shipment) = updated else {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(None);
        };

        insert_notification(&mut tx, shipment.user_id, shipment.id, title, description).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(Some(shipment))
    }
}

/// Insert a notification row inside an open transaction.
async fn insert_notification(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
    shipment_id: Uuid,
    title: &str,
    description: &str,
) -> AppResult<()> {
    let conn: &mut PgConnection = &mut *tx;
    sqlx::query(
        "INSERT INTO notifications (user_id, shipment_id, title, description) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(shipment_id)
    .bind(title)
    .bind(description)
    .execute(conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))?;
    Ok(())
}
