// ABOUTME: Database operations for pickup locations
// ABOUTME: Lists active pickup spots and resolves the spot chosen at checkout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::column;
use crate::errors::{AppError, AppResult};
use crate::models::PickupSpot;
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

/// Request to create a pickup spot
#[derive(Debug, Clone, Deserialize)]
pub struct NewPickupSpot {
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Opening hours text
    pub schedule: Option<String>,
    /// Municipality label
    pub zone: Option<String>,
    /// Whether customers may choose it
    pub active: bool,
}

/// Pickup spot database operations manager
pub struct PickupSpotManager {
    pool: SqlitePool,
}

impl PickupSpotManager {
    /// Create a new pickup spot manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a pickup spot
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_pickup_spot(&self, request: &NewPickupSpot) -> AppResult<PickupSpot> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r"
            INSERT INTO pickup_spots (id, name, address, schedule, zone, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.address)
        .bind(&request.schedule)
        .bind(&request.zone)
        .bind(request.active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create pickup spot: {e}")))?;

        Ok(PickupSpot {
            id,
            name: request.name.clone(),
            address: request.address.clone(),
            schedule: request.schedule.clone(),
            zone: request.zone.clone(),
            active: request.active,
        })
    }

    /// Active pickup spots ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_active(&self) -> AppResult<Vec<PickupSpot>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, address, schedule, zone, active
            FROM pickup_spots
            WHERE active = 1
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list pickup spots: {e}")))?;

        rows.iter().map(row_to_pickup_spot).collect()
    }

    /// Get a pickup spot by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_pickup_spot(&self, spot_id: &str) -> AppResult<Option<PickupSpot>> {
        let row = sqlx::query(
            r"
            SELECT id, name, address, schedule, zone, active
            FROM pickup_spots
            WHERE id = $1
            ",
        )
        .bind(spot_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get pickup spot: {e}")))?;

        row.map(|r| row_to_pickup_spot(&r)).transpose()
    }
}

fn row_to_pickup_spot(row: &SqliteRow) -> AppResult<PickupSpot> {
    Ok(PickupSpot {
        id: column(row, "id")?,
        name: column(row, "name")?,
        address: column(row, "address")?,
        schedule: column(row, "schedule")?,
        zone: column(row, "zone")?,
        active: column(row, "active")?,
    })
}
