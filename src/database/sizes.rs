// ABOUTME: Database operations for portion sizes
// ABOUTME: Stores catalog sizes and customer custom sizes with per-owner unique names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{column, is_unique_violation, timestamp_column, u32_column};
use crate::errors::{AppError, AppResult};
use crate::models::{PortionGrams, Size};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

/// Request to persist a size
#[derive(Debug, Clone)]
pub struct NewSize {
    /// Display name, unique per owner
    pub name: String,
    /// Catalog size shown on every meal
    pub is_main: bool,
    /// Owning customer for custom sizes
    pub customer_id: Option<String>,
    /// Raw gram quantities
    pub portion: PortionGrams,
    /// Individual meal price in centavos
    pub price: i64,
    /// Per-meal price inside a package in centavos
    pub package_price: i64,
}

/// Size database operations manager
pub struct SizeManager {
    pool: SqlitePool,
}

impl SizeManager {
    /// Create a new size manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a size
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the owner already has a size with
    /// this name, or a database error if the insert fails
    pub async fn create_size(&self, request: &NewSize) -> AppResult<Size> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO sizes (
                id, name, is_main, customer_id, protein_qty, carb_qty, veg_qty,
                price, package_price, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(request.is_main)
        .bind(&request.customer_id)
        .bind(i64::from(request.portion.protein_qty))
        .bind(i64::from(request.portion.carb_qty))
        .bind(i64::from(request.portion.veg_qty))
        .bind(request.price)
        .bind(request.package_price)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists(format!(
                    "A size named \"{}\" already exists. Use another name.",
                    request.name
                ))
            } else {
                AppError::database(format!("Failed to create size: {e}"))
            }
        })?;

        Ok(Size {
            id,
            name: request.name.clone(),
            is_main: request.is_main,
            customer_id: request.customer_id.clone(),
            protein_qty: request.portion.protein_qty,
            carb_qty: request.portion.carb_qty,
            veg_qty: request.portion.veg_qty,
            price: request.price,
            package_price: request.package_price,
            created_at: now,
        })
    }

    /// Catalog sizes ordered by price
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_main_sizes(&self) -> AppResult<Vec<Size>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, is_main, customer_id, protein_qty, carb_qty, veg_qty,
                   price, package_price, created_at
            FROM sizes
            WHERE is_main = 1
            ORDER BY price ASC, name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list sizes: {e}")))?;

        rows.iter().map(row_to_size).collect()
    }

    /// Custom sizes owned by a customer, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_custom_sizes(&self, customer_id: &str) -> AppResult<Vec<Size>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, is_main, customer_id, protein_qty, carb_qty, veg_qty,
                   price, package_price, created_at
            FROM sizes
            WHERE is_main = 0 AND customer_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list custom sizes: {e}")))?;

        rows.iter().map(row_to_size).collect()
    }

    /// Get a size by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_size(&self, size_id: &str) -> AppResult<Option<Size>> {
        let row = sqlx::query(
            r"
            SELECT id, name, is_main, customer_id, protein_qty, carb_qty, veg_qty,
                   price, package_price, created_at
            FROM sizes
            WHERE id = $1
            ",
        )
        .bind(size_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get size: {e}")))?;

        row.map(|r| row_to_size(&r)).transpose()
    }
}

fn row_to_size(row: &SqliteRow) -> AppResult<Size> {
    Ok(Size {
        id: column(row, "id")?,
        name: column(row, "name")?,
        is_main: column(row, "is_main")?,
        customer_id: column(row, "customer_id")?,
        protein_qty: u32_column(row, "protein_qty")?,
        carb_qty: u32_column(row, "carb_qty")?,
        veg_qty: u32_column(row, "veg_qty")?,
        price: column(row, "price")?,
        package_price: column(row, "package_price")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::errors::ErrorCode;

    fn custom(name: &str) -> NewSize {
        NewSize {
            name: name.to_owned(),
            is_main: false,
            customer_id: None,
            portion: PortionGrams::new(180, 55, 70),
            price: 15_500,
            package_price: 15_000,
        }
    }

    #[tokio::test]
    async fn test_duplicate_anonymous_name_conflicts() {
        let db = Database::new_in_memory().await.unwrap();
        let sizes = db.sizes();

        sizes.create_size(&custom("Mi tamaño")).await.unwrap();
        let err = sizes.create_size(&custom("Mi tamaño")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
        assert_eq!(
            err.message,
            "A size named \"Mi tamaño\" already exists. Use another name."
        );
    }

    #[tokio::test]
    async fn test_round_trip_preserves_grams() {
        let db = Database::new_in_memory().await.unwrap();
        let sizes = db.sizes();

        let created = sizes.create_size(&custom("Bulk")).await.unwrap();
        let loaded = sizes.get_size(&created.id).await.unwrap().unwrap();

        assert!(loaded.is_custom());
        assert_eq!(loaded.portion(), PortionGrams::new(180, 55, 70));
        assert_eq!(loaded.package_price, 15_000);
    }
}
