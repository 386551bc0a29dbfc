//! Category management service for the hierarchical product catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{category_path, would_create_cycle, Category};

/// Category service for managing the category tree
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

/// Database row for a category
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    parent_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            parent_id: row.parent_id,
            created_at: row.created_at,
        }
    }
}

/// Category with its computed full path and direct subcategories
#[derive(Debug, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub full_path: String,
    pub subcategories: Vec<Category>,
}

/// Input for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

/// Input for updating a category
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    /// Set to true to detach the category from its parent.
    #[serde(default)]
    pub clear_parent: bool,
}

impl CategoryService {
    /// Create a new CategoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all categories ordered by name
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, parent_id, created_at
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Get a category with its full path and direct subcategories
    pub async fn get_category(&self, category_id: Uuid) -> AppResult<CategoryDetail> {
        let category: Category = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, parent_id, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?
        .into();

        let full_path = self.full_path(&category).await?;

        let subcategories = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, parent_id, created_at
            FROM categories
            WHERE parent_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

        Ok(CategoryDetail {
            category,
            full_path,
            subcategories,
        })
    }

    /// Create a new category
    pub async fn create_category(&self, input: CreateCategoryInput) -> AppResult<CategoryDetail> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Category name cannot be empty".to_string(),
            });
        }

        // Unique name
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE name = $1")
                .bind(&input.name)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("category name".to_string()));
        }

        // Parent must exist
        if let Some(parent_id) = input.parent_id {
            self.ensure_exists(parent_id).await?;
        }

        let category_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO categories (name, description, parent_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.parent_id)
        .fetch_one(&self.db)
        .await?;

        self.get_category(category_id).await
    }

    /// Update an existing category
    pub async fn update_category(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> AppResult<CategoryDetail> {
        let existing: Category = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, parent_id, created_at FROM categories WHERE id = $1",
        )
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?
        .into();

        let name = input.name.unwrap_or(existing.name);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Category name cannot be empty".to_string(),
            });
        }

        let description = input.description.or(existing.description);
        let parent_id = if input.clear_parent {
            None
        } else {
            input.parent_id.or(existing.parent_id)
        };

        // Re-parenting must not close a loop in the tree.
        if let Some(parent_id) = parent_id {
            self.ensure_exists(parent_id).await?;
            if self.check_cycle(category_id, parent_id).await? {
                return Err(AppError::CategoryCycle(
                    "Category cannot be its own ancestor".to_string(),
                ));
            }
        }

        sqlx::query(
            r#"
            UPDATE categories
            SET name = $1, description = $2, parent_id = $3
            WHERE id = $4
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(parent_id)
        .bind(category_id)
        .execute(&self.db)
        .await?;

        self.get_category(category_id).await
    }

    /// Delete a category. Products referencing it survive with a null
    /// category; subcategories are removed with their parent.
    pub async fn delete_category(&self, category_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }

    /// Compute the full path of a category by walking the parent chain.
    async fn full_path(&self, category: &Category) -> AppResult<String> {
        let mut names = vec![category.name.clone()];
        let mut current = category.parent_id;

        while let Some(parent_id) = current {
            let row = sqlx::query_as::<_, (String, Option<Uuid>)>(
                "SELECT name, parent_id FROM categories WHERE id = $1",
            )
            .bind(parent_id)
            .fetch_optional(&self.db)
            .await?;

            match row {
                Some((name, next_parent)) => {
                    names.push(name);
                    current = next_parent;
                }
                None => break,
            }
        }

        names.reverse();
        Ok(category_path(&names))
    }

    /// Check whether attaching `category_id` under `parent_id` would form a
    /// cycle. Loads the parent map once and defers to the pure walk in
    /// [`shared::models::would_create_cycle`].
    async fn check_cycle(&self, category_id: Uuid, parent_id: Uuid) -> AppResult<bool> {
        let parents: HashMap<Uuid, Option<Uuid>> =
            sqlx::query_as::<_, (Uuid, Option<Uuid>)>("SELECT id, parent_id FROM categories")
                .fetch_all(&self.db)
                .await?
                .into_iter()
                .collect();

        Ok(would_create_cycle(category_id, parent_id, &parents))
    }

    async fn ensure_exists(&self, category_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }
}
