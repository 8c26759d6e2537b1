// ABOUTME: Database operations for storefront customers
// ABOUTME: Upserts customers by email at checkout and loads them for notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{column, timestamp_column};
use crate::errors::{AppError, AppResult};
use crate::models::{Customer, CustomerInfo};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

/// Customer database operations manager
pub struct CustomerManager {
    pool: SqlitePool,
}

impl CustomerManager {
    /// Create a new customer manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the customer, or refresh name and phone when the email exists
    ///
    /// Emails are compared trimmed and lower-cased.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert or the follow-up read fails
    pub async fn upsert_by_email(&self, info: &CustomerInfo) -> AppResult<Customer> {
        let email = normalize_email(&info.email);
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO customers (id, full_name, email, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT(email) DO UPDATE SET
                full_name = excluded.full_name,
                phone = excluded.phone,
                updated_at = excluded.updated_at
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(info.name.trim())
        .bind(&email)
        .bind(info.phone.trim())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert customer: {e}")))?;

        self.get_by_email(&email)
            .await?
            .ok_or_else(|| AppError::internal("Customer missing after upsert"))
    }

    /// Get a customer by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_customer(&self, customer_id: &str) -> AppResult<Option<Customer>> {
        let row = sqlx::query(
            r"
            SELECT id, full_name, email, phone, created_at, updated_at
            FROM customers
            WHERE id = $1
            ",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get customer: {e}")))?;

        row.map(|r| row_to_customer(&r)).transpose()
    }

    /// Get a customer by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let row = sqlx::query(
            r"
            SELECT id, full_name, email, phone, created_at, updated_at
            FROM customers
            WHERE email = $1
            ",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get customer by email: {e}")))?;

        row.map(|r| row_to_customer(&r)).transpose()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn row_to_customer(row: &SqliteRow) -> AppResult<Customer> {
    Ok(Customer {
        id: column(row, "id")?,
        full_name: column(row, "full_name")?,
        email: column(row, "email")?,
        phone: column(row, "phone")?,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}
