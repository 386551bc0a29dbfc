//! Stock movement models and quantity application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Types of stock movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Adjustment => "adjustment",
        }
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(MovementType::In),
            "out" => Ok(MovementType::Out),
            "adjustment" => Ok(MovementType::Adjustment),
            other => Err(format!("Unknown movement type: {}", other)),
        }
    }
}

/// A recorded stock movement.
///
/// Movements are append-only: once recorded, their effect on the product
/// quantity is never rolled back by editing or deleting the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reason: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Apply a movement to a stock quantity and return the new quantity.
///
/// In adds, Out subtracts, Adjustment adds the signed quantity. The result
/// is clamped at zero: an Out larger than the current stock empties the
/// shelf rather than going negative. The arithmetic saturates, so a
/// quantity past the i32 range pins at the boundary instead of wrapping.
pub fn apply_movement(stock_quantity: i32, movement_type: MovementType, quantity: i32) -> i32 {
    let updated = match movement_type {
        MovementType::In | MovementType::Adjustment => stock_quantity.saturating_add(quantity),
        MovementType::Out => stock_quantity.saturating_sub(quantity),
    };
    updated.max(0)
}
