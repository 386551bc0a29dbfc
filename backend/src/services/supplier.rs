//! Supplier management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::merge_optional;
use shared::models::Supplier;
use shared::validation::{validate_email, validate_phone};

/// Supplier service for managing supplier records
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Database row for a supplier
#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    contact_person: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            contact_person: row.contact_person,
            email: row.email,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input for updating a supplier
///
/// Omitted fields keep their stored value; the `clear_*` flags null them
/// explicitly.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub clear_contact_person: bool,
    pub clear_email: bool,
    pub clear_phone: bool,
    pub clear_address: bool,
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all suppliers ordered by name
    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, contact_person, email, phone, address, created_at
            FROM suppliers
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    /// Get a supplier by ID
    pub async fn get_supplier(&self, supplier_id: Uuid) -> AppResult<Supplier> {
        let supplier = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, contact_person, email, phone, address, created_at
            FROM suppliers
            WHERE id = $1
            "#,
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(supplier.into())
    }

    /// Create a new supplier
    pub async fn create_supplier(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Supplier name cannot be empty".to_string(),
            });
        }

        Self::validate_contact(input.email.as_deref(), input.phone.as_deref())?;

        let supplier = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, contact_person, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, contact_person, email, phone, address, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier.into())
    }

    /// Update an existing supplier
    pub async fn update_supplier(
        &self,
        supplier_id: Uuid,
        input: UpdateSupplierInput,
    ) -> AppResult<Supplier> {
        let existing = self.get_supplier(supplier_id).await?;

        let name = input.name.unwrap_or(existing.name);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Supplier name cannot be empty".to_string(),
            });
        }

        let contact_person = merge_optional(
            input.clear_contact_person,
            input.contact_person,
            existing.contact_person,
        );
        let email = merge_optional(input.clear_email, input.email, existing.email);
        let phone = merge_optional(input.clear_phone, input.phone, existing.phone);
        let address = merge_optional(input.clear_address, input.address, existing.address);

        Self::validate_contact(email.as_deref(), phone.as_deref())?;

        let supplier = sqlx::query_as::<_, SupplierRow>(
            r#"
            UPDATE suppliers
            SET name = $1, contact_person = $2, email = $3, phone = $4, address = $5
            WHERE id = $6
            RETURNING id, name, contact_person, email, phone, address, created_at
            "#,
        )
        .bind(&name)
        .bind(&contact_person)
        .bind(&email)
        .bind(&phone)
        .bind(&address)
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier.into())
    }

    /// Delete a supplier. Products referencing it survive with a null
    /// supplier.
    pub async fn delete_supplier(&self, supplier_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }

    fn validate_contact(email: Option<&str>, phone: Option<&str>) -> AppResult<()> {
        if let Some(email) = email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(phone) = phone {
            validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "phone".to_string(),
                message: msg.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_input_clear_flags() {
        let input: UpdateSupplierInput = serde_json::from_str(
            r#"{ "clear_email": true, "clear_phone": true }"#,
        )
        .unwrap();

        let email = merge_optional(
            input.clear_email,
            input.email,
            Some("old@example.com".to_string()),
        );
        let phone = merge_optional(input.clear_phone, input.phone, Some("+36 1 1".to_string()));
        assert_eq!(email, None);
        assert_eq!(phone, None);
    }

    #[test]
    fn test_update_input_omitted_fields_keep_stored_values() {
        let input: UpdateSupplierInput =
            serde_json::from_str(r#"{ "name": "Renamed Ltd." }"#).unwrap();

        let existing = Some("old@example.com".to_string());
        assert_eq!(
            merge_optional(input.clear_email, input.email.clone(), existing.clone()),
            existing
        );
    }
}
