// ABOUTME: SQLite database connection, migrations and table managers
// ABOUTME: Owns the pool and hands out per-table managers for the storefront data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `SQLite` storage for the storefront catalog (ingredients, recipes, meals,
//! sizes, packages), customers, pickup spots and orders. Each table group has
//! its own manager holding a clone of the connection pool.

/// Ingredients, recipes, meals and packages
pub mod catalog;
/// Customer records keyed by email
pub mod customers;
/// Orders and order items
pub mod orders;
/// Pickup locations
pub mod pickup_spots;
/// Demo catalog used by the `seed-catalog` binary and tests
pub mod seed;
/// Catalog and custom portion sizes
pub mod sizes;

pub use catalog::{CatalogManager, NewIngredient, NewMeal, NewPackage, NewRecipe};
pub use customers::CustomerManager;
pub use orders::{NewOrder, NewOrderItem, OrderManager};
pub use pickup_spots::{NewPickupSpot, PickupSpotManager};
pub use sizes::{NewSize, SizeManager};

use crate::errors::{AppError, AppResult};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Decode, Row, Sqlite, SqlitePool, Type};

/// Database manager for the storefront tables
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        if database_url.contains(":memory:") {
            return Self::new_in_memory().await;
        }

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;
        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Create a private in-memory database
    ///
    /// The pool keeps exactly one connection alive for its whole lifetime so
    /// every query sees the same in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` cannot be opened or a migration fails
    pub async fn new_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Catalog operations
    #[must_use]
    pub fn catalog(&self) -> CatalogManager {
        CatalogManager::new(self.pool.clone())
    }

    /// Size operations
    #[must_use]
    pub fn sizes(&self) -> SizeManager {
        SizeManager::new(self.pool.clone())
    }

    /// Customer operations
    #[must_use]
    pub fn customers(&self) -> CustomerManager {
        CustomerManager::new(self.pool.clone())
    }

    /// Order operations
    #[must_use]
    pub fn orders(&self) -> OrderManager {
        OrderManager::new(self.pool.clone())
    }

    /// Pickup spot operations
    #[must_use]
    pub fn pickup_spots(&self) -> PickupSpotManager {
        PickupSpotManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE` statement fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_catalog().await?;
        self.migrate_customers().await?;
        self.migrate_sizes().await?;
        self.migrate_orders().await?;

        Ok(())
    }

    /// Create ingredient, recipe, meal and package tables
    async fn migrate_catalog(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                type TEXT CHECK (type IN ('pro', 'carb', 'veg')),
                calories REAL NOT NULL DEFAULT 0 CHECK (calories >= 0),
                protein REAL NOT NULL DEFAULT 0 CHECK (protein >= 0),
                carbs REAL NOT NULL DEFAULT 0 CHECK (carbs >= 0),
                fats REAL NOT NULL DEFAULT 0 CHECK (fats >= 0),
                unit TEXT NOT NULL DEFAULT 'g',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                type TEXT NOT NULL DEFAULT 'main' CHECK (type IN ('main', 'sub')),
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                ingredient_id TEXT NOT NULL REFERENCES ingredients(id),
                qty REAL NOT NULL,
                unit TEXT NOT NULL DEFAULT 'g',
                PRIMARY KEY (recipe_id, position)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meals (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                img TEXT,
                main_recipe_id TEXT NOT NULL REFERENCES recipes(id),
                active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_sub_recipes (
                meal_id TEXT NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
                recipe_id TEXT NOT NULL REFERENCES recipes(id),
                position INTEGER NOT NULL,
                PRIMARY KEY (meal_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS packages (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                img TEXT,
                description TEXT,
                meals_included INTEGER NOT NULL CHECK (meals_included > 0),
                active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_meals_active ON meals(active)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create customer and pickup spot tables
    async fn migrate_customers(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS customers (
                id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pickup_spots (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                address TEXT NOT NULL,
                schedule TEXT,
                zone TEXT,
                active INTEGER NOT NULL DEFAULT 1
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create the sizes table
    async fn migrate_sizes(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sizes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                is_main INTEGER NOT NULL DEFAULT 0,
                customer_id TEXT REFERENCES customers(id) ON DELETE CASCADE,
                protein_qty INTEGER NOT NULL CHECK (protein_qty >= 0),
                carb_qty INTEGER NOT NULL CHECK (carb_qty >= 0),
                veg_qty INTEGER NOT NULL CHECK (veg_qty >= 0),
                price INTEGER NOT NULL,
                package_price INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Names are unique per owner; catalog and anonymous sizes share the empty owner
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_sizes_name_owner ON sizes(name, IFNULL(customer_id, ''))",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create order and order item tables
    async fn migrate_orders(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                order_number TEXT NOT NULL UNIQUE,
                conekta_order_id TEXT,
                customer_id TEXT NOT NULL REFERENCES customers(id),
                total_amount INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'paid', 'preparing', 'delivered', 'cancelled')),
                shipping_method TEXT NOT NULL,
                shipping_cost INTEGER NOT NULL DEFAULT 0,
                delivery_address TEXT,
                postal_code TEXT,
                pickup_spot_id TEXT REFERENCES pickup_spots(id),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS order_items (
                id TEXT PRIMARY KEY,
                order_id TEXT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
                meal_id TEXT NOT NULL REFERENCES meals(id),
                size_id TEXT NOT NULL REFERENCES sizes(id),
                qty INTEGER NOT NULL CHECK (qty > 0),
                unit_price INTEGER NOT NULL,
                package_id TEXT REFERENCES packages(id),
                package_instance_id TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Read a column, mapping decode failures to a database error
pub(crate) fn column<'r, T>(row: &'r SqliteRow, name: &str) -> AppResult<T>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| AppError::database(format!("Failed to get {name}: {e}")))
}

/// Parse an RFC 3339 timestamp stored as text
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}

/// Read an RFC 3339 timestamp column
pub(crate) fn timestamp_column(row: &SqliteRow, name: &str) -> AppResult<DateTime<Utc>> {
    let raw: String = column(row, name)?;
    parse_timestamp(&raw)
}

/// Read a non-negative integer column into `u32`
pub(crate) fn u32_column(row: &SqliteRow, name: &str) -> AppResult<u32> {
    let raw: i64 = column(row, name)?;
    u32::try_from(raw).map_err(|_| AppError::database(format!("Column {name} out of range: {raw}")))
}

/// Whether a `sqlx` error is a unique-constraint violation
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    error.to_string().contains("UNIQUE constraint failed")
}
