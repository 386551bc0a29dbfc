//! Product image service: the 5-image cap and the single-main-image rule

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{ProductImage, MAX_IMAGES_PER_PRODUCT};

/// Image service for managing product images
#[derive(Clone)]
pub struct ImageService {
    db: PgPool,
}

/// Database row for a product image
#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    product_id: Uuid,
    image_url: String,
    alt_text: Option<String>,
    is_main: bool,
    position: i32,
    created_at: DateTime<Utc>,
}

impl From<ImageRow> for ProductImage {
    fn from(row: ImageRow) -> Self {
        ProductImage {
            id: row.id,
            product_id: row.product_id,
            image_url: row.image_url,
            alt_text: row.alt_text,
            is_main: row.is_main,
            position: row.position,
            created_at: row.created_at,
        }
    }
}

/// Input for attaching an image to a product
#[derive(Debug, Deserialize)]
pub struct AddImageInput {
    pub image_url: String,
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_main: bool,
    pub position: Option<i32>,
}

/// Load all images of a product ordered by (position, created_at).
///
/// Shared with the product service for detail views.
pub(crate) async fn image_rows_for_product(
    db: &PgPool,
    product_id: Uuid,
) -> AppResult<Vec<ProductImage>> {
    let rows = sqlx::query_as::<_, ImageRow>(
        r#"
        SELECT id, product_id, image_url, alt_text, is_main, position, created_at
        FROM product_images
        WHERE product_id = $1
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(product_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(ProductImage::from).collect())
}

impl ImageService {
    /// Create a new ImageService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List images for a product
    pub async fn list_images(&self, product_id: Uuid) -> AppResult<Vec<ProductImage>> {
        self.ensure_product_exists(product_id).await?;
        image_rows_for_product(&self.db, product_id).await
    }

    /// Attach an image to a product, enforcing the image cap.
    ///
    /// When the new image is flagged as main, sibling flags are cleared in
    /// the same transaction so at most one main image is ever visible.
    pub async fn add_image(
        &self,
        product_id: Uuid,
        input: AddImageInput,
    ) -> AppResult<ProductImage> {
        if input.image_url.trim().is_empty() {
            return Err(AppError::Validation {
                field: "image_url".to_string(),
                message: "Image URL cannot be empty".to_string(),
            });
        }

        self.ensure_product_exists(product_id).await?;

        let mut tx = self.db.begin().await?;

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM product_images WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        if count as usize >= MAX_IMAGES_PER_PRODUCT {
            return Err(AppError::ImageLimitReached(format!(
                "A product can have at most {} images",
                MAX_IMAGES_PER_PRODUCT
            )));
        }

        if input.is_main {
            sqlx::query("UPDATE product_images SET is_main = false WHERE product_id = $1")
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
        }

        let position = input.position.unwrap_or(count as i32);

        let image = sqlx::query_as::<_, ImageRow>(
            r#"
            INSERT INTO product_images (product_id, image_url, alt_text, is_main, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, image_url, alt_text, is_main, position, created_at
            "#,
        )
        .bind(product_id)
        .bind(&input.image_url)
        .bind(&input.alt_text)
        .bind(input.is_main)
        .bind(position)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(image.into())
    }

    /// Make one image the main image of its product.
    ///
    /// Flags the chosen image and clears all siblings in a single
    /// transaction, so concurrent readers never observe zero or two mains.
    pub async fn set_main_image(
        &self,
        product_id: Uuid,
        image_id: Uuid,
    ) -> AppResult<ProductImage> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_images WHERE id = $1 AND product_id = $2)",
        )
        .bind(image_id)
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Product image".to_string()));
        }

        sqlx::query("UPDATE product_images SET is_main = false WHERE product_id = $1 AND id != $2")
            .bind(product_id)
            .bind(image_id)
            .execute(&mut *tx)
            .await?;

        let image = sqlx::query_as::<_, ImageRow>(
            r#"
            UPDATE product_images
            SET is_main = true
            WHERE id = $1
            RETURNING id, product_id, image_url, alt_text, is_main, position, created_at
            "#,
        )
        .bind(image_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(image.into())
    }

    /// Delete an image from a product
    pub async fn delete_image(&self, product_id: Uuid, image_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = $1 AND product_id = $2")
            .bind(image_id)
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product image".to_string()));
        }

        Ok(())
    }

    async fn ensure_product_exists(&self, product_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }
}
