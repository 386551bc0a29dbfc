//! Stock movement service: recording movements and applying them to products

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{apply_movement, MovementType, StockMovement};

/// Stock service for recording movements and keeping product quantities
/// consistent with them
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Database row for a stock movement
#[derive(Debug, sqlx::FromRow)]
struct MovementRow {
    id: Uuid,
    product_id: Uuid,
    movement_type: String,
    quantity: i32,
    reason: Option<String>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MovementRow> for StockMovement {
    type Error = AppError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        let movement_type = MovementType::from_str(&row.movement_type)
            .map_err(AppError::Internal)?;
        Ok(StockMovement {
            id: row.id,
            product_id: row.product_id,
            movement_type,
            quantity: row.quantity,
            reason: row.reason,
            created_by: row.created_by,
            created_at: row.created_at,
        })
    }
}

/// A movement with the product it belongs to, for listing views
#[derive(Debug, Serialize)]
pub struct MovementWithProduct {
    #[serde(flatten)]
    pub movement: StockMovement,
    pub product_name: String,
    pub product_sku: String,
}

#[derive(Debug, sqlx::FromRow)]
struct MovementWithProductRow {
    id: Uuid,
    product_id: Uuid,
    movement_type: String,
    quantity: i32,
    reason: Option<String>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    product_name: String,
    product_sku: String,
}

/// Input for recording a stock movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub product_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reason: Option<String>,
}

/// Result of recording a movement: the record plus the quantity it produced
#[derive(Debug, Serialize)]
pub struct MovementRecorded {
    #[serde(flatten)]
    pub movement: StockMovement,
    pub new_stock_quantity: i32,
}

/// Load the most recent movements of a product, newest first.
///
/// Shared with the product service for detail views.
pub(crate) async fn movements_for_product(
    db: &PgPool,
    product_id: Uuid,
    limit: i64,
) -> AppResult<Vec<StockMovement>> {
    let rows = sqlx::query_as::<_, MovementRow>(
        r#"
        SELECT id, product_id, movement_type, quantity, reason, created_by, created_at
        FROM stock_movements
        WHERE product_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(product_id)
    .bind(limit)
    .fetch_all(db)
    .await?;

    rows.into_iter().map(StockMovement::try_from).collect()
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a stock movement and apply it to the product quantity.
    ///
    /// The movement row and the product's new quantity are written in one
    /// transaction, with the product row locked for the duration, so a
    /// concurrent movement cannot interleave between read and write. The
    /// quantity math itself lives in [`shared::models::apply_movement`].
    pub async fn record_movement(
        &self,
        user_id: Uuid,
        input: RecordMovementInput,
    ) -> AppResult<MovementRecorded> {
        match input.movement_type {
            MovementType::In | MovementType::Out => {
                if input.quantity <= 0 {
                    return Err(AppError::Validation {
                        field: "quantity".to_string(),
                        message: "Quantity must be positive for in/out movements".to_string(),
                    });
                }
            }
            MovementType::Adjustment => {
                if input.quantity == 0 {
                    return Err(AppError::Validation {
                        field: "quantity".to_string(),
                        message: "Adjustment quantity cannot be zero".to_string(),
                    });
                }
            }
        }

        let mut tx = self.db.begin().await?;

        let stock_quantity = sqlx::query_scalar::<_, i32>(
            "SELECT stock_quantity FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let new_quantity = apply_movement(stock_quantity, input.movement_type, input.quantity);

        let row = sqlx::query_as::<_, MovementRow>(
            r#"
            INSERT INTO stock_movements (product_id, movement_type, quantity, reason, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, movement_type, quantity, reason, created_by, created_at
            "#,
        )
        .bind(input.product_id)
        .bind(input.movement_type.as_str())
        .bind(input.quantity)
        .bind(&input.reason)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET stock_quantity = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_quantity)
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(MovementRecorded {
            movement: row.try_into()?,
            new_stock_quantity: new_quantity,
        })
    }

    /// List all movements, newest first, with product name and SKU
    pub async fn list_movements(&self) -> AppResult<Vec<MovementWithProduct>> {
        let rows = sqlx::query_as::<_, MovementWithProductRow>(
            r#"
            SELECT sm.id, sm.product_id, sm.movement_type, sm.quantity, sm.reason,
                   sm.created_by, sm.created_at, p.name AS product_name, p.sku AS product_sku
            FROM stock_movements sm
            JOIN products p ON p.id = sm.product_id
            ORDER BY sm.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|row| {
                let movement_type = MovementType::from_str(&row.movement_type)
                    .map_err(AppError::Internal)?;
                Ok(MovementWithProduct {
                    movement: StockMovement {
                        id: row.id,
                        product_id: row.product_id,
                        movement_type,
                        quantity: row.quantity,
                        reason: row.reason,
                        created_by: row.created_by,
                        created_at: row.created_at,
                    },
                    product_name: row.product_name,
                    product_sku: row.product_sku,
                })
            })
            .collect()
    }

    /// List all movements of a single product, newest first
    pub async fn list_product_movements(&self, product_id: Uuid) -> AppResult<Vec<StockMovement>> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        movements_for_product(&self.db, product_id, i64::MAX).await
    }
}
