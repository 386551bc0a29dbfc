//! Product management service: catalog CRUD, search and stock warnings

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::image::image_rows_for_product;
use crate::services::merge_optional;
use crate::services::stock::movements_for_product;
use shared::models::{main_image, Product, ProductImage, StockMovement, StockStatus};
use shared::pricing;
use shared::validation::{validate_ean13, validate_sku};

/// Product service for catalog management
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Database row for a product
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub ean13: Option<String>,
    pub net_price: Decimal,
    pub vat_rate: Decimal,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub stock_quantity: i32,
    pub min_stock_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            sku: row.sku,
            ean13: row.ean13,
            net_price: row.net_price,
            vat_rate: row.vat_rate,
            category_id: row.category_id,
            supplier_id: row.supplier_id,
            stock_quantity: row.stock_quantity,
            min_stock_level: row.min_stock_level,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, sku, ean13, net_price, vat_rate, \
     category_id, supplier_id, stock_quantity, min_stock_level, created_at, updated_at";

/// Product with derived pricing and stock fields
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    #[serde(flatten)]
    pub product: Product,
    pub gross_price: Decimal,
    pub is_low_stock: bool,
    pub stock_status: StockStatus,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        ProductSummary {
            gross_price: product.gross_price(),
            is_low_stock: product.is_low_stock(),
            stock_status: product.stock_status(),
            product,
        }
    }
}

/// Product detail: summary plus images and recent stock movements
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub images: Vec<ProductImage>,
    pub main_image_id: Option<Uuid>,
    pub recent_movements: Vec<StockMovement>,
}

/// Search and filter parameters for product listings
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Free-text search over name, SKU and description
    pub q: Option<String>,
    /// Restrict to a category
    pub category: Option<Uuid>,
}

/// Which price the client supplied; the other side is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceInput {
    #[default]
    Net,
    Gross,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub ean13: Option<String>,
    #[serde(default)]
    pub price_input: PriceInput,
    pub net_price: Option<Decimal>,
    pub gross_price: Option<Decimal>,
    pub vat_rate: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub stock_quantity: Option<i32>,
    pub min_stock_level: Option<i32>,
}

/// Input for updating a product
///
/// Omitted optional fields keep their stored value; the `clear_*` flags
/// null them explicitly.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub ean13: Option<String>,
    pub price_input: PriceInput,
    pub net_price: Option<Decimal>,
    pub gross_price: Option<Decimal>,
    pub vat_rate: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub min_stock_level: Option<i32>,
    pub clear_description: bool,
    pub clear_ean13: bool,
    pub clear_category: bool,
    pub clear_supplier: bool,
}

/// Resolve the stored net price from the selected input mode.
///
/// Gross mode derives net via exact decimal division; net mode uses the
/// given value as-is (rounded to two places). The missing price for the
/// selected mode is a field-level error, matching the form behaviour.
pub fn resolve_net_price(
    price_input: PriceInput,
    net_price: Option<Decimal>,
    gross_price: Option<Decimal>,
    vat_rate: Decimal,
) -> AppResult<Decimal> {
    let net = match price_input {
        PriceInput::Gross => {
            let gross = gross_price.ok_or_else(|| AppError::Validation {
                field: "gross_price".to_string(),
                message: "Gross price is required when gross input is selected".to_string(),
            })?;
            pricing::net_from_gross(gross, vat_rate)
        }
        PriceInput::Net => {
            let net = net_price.ok_or_else(|| AppError::Validation {
                field: "net_price".to_string(),
                message: "Net price is required when net input is selected".to_string(),
            })?;
            pricing::round_price(net)
        }
    };

    if net < Decimal::ZERO {
        return Err(AppError::Validation {
            field: "net_price".to_string(),
            message: "Net price cannot be negative".to_string(),
        });
    }

    Ok(net)
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List products with optional search and category filter
    pub async fn list_products(&self, query: &ProductQuery) -> AppResult<Vec<ProductSummary>> {
        let pattern = query.q.as_ref().map(|q| format!("%{}%", q));

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::text IS NULL OR name ILIKE $1 OR sku ILIKE $1 OR description ILIKE $1)
              AND ($2::uuid IS NULL OR category_id = $2)
            ORDER BY name ASC
            "#
        ))
        .bind(&pattern)
        .bind(query.category)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProductSummary::from(Product::from(r)))
            .collect())
    }

    /// List products with warnings: low stock or negative stock, worst first
    pub async fn list_warnings(&self, query: &ProductQuery) -> AppResult<Vec<ProductSummary>> {
        let pattern = query.q.as_ref().map(|q| format!("%{}%", q));

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE (stock_quantity <= min_stock_level OR stock_quantity < 0)
              AND ($1::text IS NULL OR name ILIKE $1 OR sku ILIKE $1 OR description ILIKE $1)
              AND ($2::uuid IS NULL OR category_id = $2)
            ORDER BY stock_quantity ASC
            "#
        ))
        .bind(&pattern)
        .bind(query.category)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProductSummary::from(Product::from(r)))
            .collect())
    }

    /// Get a product with its images and the last ten stock movements
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<ProductDetail> {
        let product: Product = self.fetch_product(product_id).await?.into();

        let images = image_rows_for_product(&self.db, product_id).await?;
        let main_image_id = main_image(&images).map(|i| i.id);
        let recent_movements = movements_for_product(&self.db, product_id, 10).await?;

        Ok(ProductDetail {
            summary: product.into(),
            images,
            main_image_id,
            recent_movements,
        })
    }

    /// Create a new product
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<ProductSummary> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Product name cannot be empty".to_string(),
            });
        }

        validate_sku(&input.sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(ean13) = input.ean13.as_deref() {
            validate_ean13(ean13).map_err(|msg| AppError::Validation {
                field: "ean13".to_string(),
                message: msg.to_string(),
            })?;
        }

        let vat_rate = input.vat_rate.unwrap_or_else(default_vat_rate);
        if vat_rate < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "vat_rate".to_string(),
                message: "VAT rate cannot be negative".to_string(),
            });
        }

        let net_price =
            resolve_net_price(input.price_input, input.net_price, input.gross_price, vat_rate)?;

        self.ensure_sku_available(&input.sku, None).await?;
        if let Some(ean13) = input.ean13.as_deref() {
            self.ensure_ean13_available(ean13, None).await?;
        }
        self.ensure_references(input.category_id, input.supplier_id)
            .await?;

        let stock_quantity = input.stock_quantity.unwrap_or(0).max(0);
        let min_stock_level = input.min_stock_level.unwrap_or(0).max(0);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, description, sku, ean13, net_price, vat_rate,
                                  category_id, supplier_id, stock_quantity, min_stock_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.sku)
        .bind(&input.ean13)
        .bind(net_price)
        .bind(vat_rate)
        .bind(input.category_id)
        .bind(input.supplier_id)
        .bind(stock_quantity)
        .bind(min_stock_level)
        .fetch_one(&self.db)
        .await?;

        Ok(ProductSummary::from(Product::from(row)))
    }

    /// Update an existing product
    ///
    /// Stock quantity is not edited here; it only changes through recorded
    /// stock movements.
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<ProductSummary> {
        let existing: Product = self.fetch_product(product_id).await?.into();

        let name = input.name.unwrap_or(existing.name);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Product name cannot be empty".to_string(),
            });
        }

        let sku = input.sku.unwrap_or(existing.sku);
        validate_sku(&sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;
        self.ensure_sku_available(&sku, Some(product_id)).await?;

        let ean13 = merge_optional(input.clear_ean13, input.ean13, existing.ean13);
        if let Some(ean13) = ean13.as_deref() {
            validate_ean13(ean13).map_err(|msg| AppError::Validation {
                field: "ean13".to_string(),
                message: msg.to_string(),
            })?;
            self.ensure_ean13_available(ean13, Some(product_id)).await?;
        }

        let vat_rate = input.vat_rate.unwrap_or(existing.vat_rate);
        if vat_rate < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "vat_rate".to_string(),
                message: "VAT rate cannot be negative".to_string(),
            });
        }

        // The form either carries a fresh price in the selected mode or
        // falls back to the stored net price.
        let net_price = if input.net_price.is_none() && input.gross_price.is_none() {
            existing.net_price
        } else {
            resolve_net_price(input.price_input, input.net_price, input.gross_price, vat_rate)?
        };

        let description =
            merge_optional(input.clear_description, input.description, existing.description);
        let category_id =
            merge_optional(input.clear_category, input.category_id, existing.category_id);
        let supplier_id =
            merge_optional(input.clear_supplier, input.supplier_id, existing.supplier_id);
        let min_stock_level = input
            .min_stock_level
            .unwrap_or(existing.min_stock_level)
            .max(0);

        self.ensure_references(category_id, supplier_id).await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = $1, description = $2, sku = $3, ean13 = $4, net_price = $5,
                vat_rate = $6, category_id = $7, supplier_id = $8, min_stock_level = $9,
                updated_at = NOW()
            WHERE id = $10
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&name)
        .bind(&description)
        .bind(&sku)
        .bind(&ean13)
        .bind(net_price)
        .bind(vat_rate)
        .bind(category_id)
        .bind(supplier_id)
        .bind(min_stock_level)
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        Ok(ProductSummary::from(Product::from(row)))
    }

    /// Delete a product. Its images and movements are removed with it.
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    pub(crate) async fn fetch_product(&self, product_id: Uuid) -> AppResult<ProductRow> {
        sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    async fn ensure_sku_available(&self, sku: &str, exclude: Option<Uuid>) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1 AND ($2::uuid IS NULL OR id != $2))",
        )
        .bind(sku)
        .bind(exclude)
        .fetch_one(&self.db)
        .await?;

        if taken {
            return Err(AppError::DuplicateEntry("sku".to_string()));
        }
        Ok(())
    }

    async fn ensure_ean13_available(&self, ean13: &str, exclude: Option<Uuid>) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE ean13 = $1 AND ($2::uuid IS NULL OR id != $2))",
        )
        .bind(ean13)
        .bind(exclude)
        .fetch_one(&self.db)
        .await?;

        if taken {
            return Err(AppError::DuplicateEntry("ean13".to_string()));
        }
        Ok(())
    }

    async fn ensure_references(
        &self,
        category_id: Option<Uuid>,
        supplier_id: Option<Uuid>,
    ) -> AppResult<()> {
        if let Some(category_id) = category_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
            )
            .bind(category_id)
            .fetch_one(&self.db)
            .await?;

            if !exists {
                return Err(AppError::NotFound("Category".to_string()));
            }
        }

        if let Some(supplier_id) = supplier_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)",
            )
            .bind(supplier_id)
            .fetch_one(&self.db)
            .await?;

            if !exists {
                return Err(AppError::NotFound("Supplier".to_string()));
            }
        }

        Ok(())
    }
}

/// Default Hungarian VAT rate, 27%.
pub fn default_vat_rate() -> Decimal {
    Decimal::new(2700, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_input_defaults() {
        let input: UpdateProductInput = serde_json::from_str("{}").unwrap();
        assert!(!input.clear_ean13);
        assert!(!input.clear_category);
        assert_eq!(input.price_input, PriceInput::Net);
    }

    #[test]
    fn test_update_input_clear_flags_null_stored_values() {
        let input: UpdateProductInput = serde_json::from_str(
            r#"{ "clear_ean13": true, "clear_category": true, "clear_supplier": true,
                 "clear_description": true }"#,
        )
        .unwrap();

        let existing_ean13 = Some("1234567890123".to_string());
        let existing_category = Some(Uuid::new_v4());

        assert_eq!(
            merge_optional(input.clear_ean13, input.ean13, existing_ean13),
            None
        );
        assert_eq!(
            merge_optional(input.clear_category, input.category_id, existing_category),
            None
        );
    }

    #[test]
    fn test_update_input_omitted_fields_keep_stored_values() {
        let input: UpdateProductInput = serde_json::from_str(r#"{ "name": "Renamed" }"#).unwrap();

        let existing = Some("1234567890123".to_string());
        assert_eq!(
            merge_optional(input.clear_ean13, input.ean13.clone(), existing.clone()),
            existing
        );
    }
}
