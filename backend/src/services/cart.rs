//! Per-user cart service, the seed of a future order module

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Cart service keeping a per-user product-to-quantity mapping
#[derive(Clone)]
pub struct CartService {
    db: PgPool,
}

/// A line in a user's cart
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CartItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: i32,
    pub updated_at: DateTime<Utc>,
}

/// A user's cart
#[derive(Debug, Serialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total_quantity: i64,
}

/// Input for adding a product to the cart
#[derive(Debug, Deserialize)]
pub struct AddToCartInput {
    /// How many units to add; defaults to one.
    pub quantity: Option<i32>,
}

impl CartService {
    /// Create a new CartService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the cart for a user
    pub async fn get_cart(&self, user_id: Uuid) -> AppResult<Cart> {
        let items = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT ci.product_id, p.name AS product_name, p.sku AS product_sku,
                   ci.quantity, ci.updated_at
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        let total_quantity = items.iter().map(|i| i.quantity as i64).sum();

        Ok(Cart {
            items,
            total_quantity,
        })
    }

    /// Add a product to the cart, incrementing the quantity if it is
    /// already there.
    pub async fn add_to_cart(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        input: AddToCartInput,
    ) -> AppResult<Cart> {
        let quantity = input.quantity.unwrap_or(1);
        if quantity <= 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity must be positive".to_string(),
            });
        }

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        sqlx::query(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                          updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.db)
        .await?;

        self.get_cart(user_id).await
    }

    /// Remove a product from the cart
    pub async fn remove_from_cart(&self, user_id: Uuid, product_id: Uuid) -> AppResult<Cart> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cart item".to_string()));
        }

        self.get_cart(user_id).await
    }

    /// Empty the cart
    pub async fn clear_cart(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
