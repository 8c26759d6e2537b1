// ABOUTME: Database operations for orders and order items
// ABOUTME: Creates numbered orders, tracks gateway ids and payment status transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{column, timestamp_column, u32_column, CustomerManager, PickupSpotManager};
use crate::errors::{AppError, AppResult};
use crate::models::{
    format_order_number, Order, OrderItem, OrderItemDetail, OrderStatus, OrderWithItems,
    ShippingMethod,
};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

/// Line to insert with a new order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    /// Meal ordered
    pub meal_id: String,
    /// Size ordered
    pub size_id: String,
    /// Quantity, at least one
    pub qty: u32,
    /// Server-side unit price in centavos
    pub unit_price: i64,
    /// Package the meal belongs to
    pub package_id: Option<String>,
    /// Groups the meals of one package purchase
    pub package_instance_id: Option<String>,
}

impl NewOrderItem {
    /// Line subtotal in centavos
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.unit_price * i64::from(self.qty)
    }
}

/// Order to insert
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Paying customer
    pub customer_id: String,
    /// Delivery or pickup
    pub shipping_method: ShippingMethod,
    /// Shipping cost in centavos
    pub shipping_cost: i64,
    /// Formatted delivery address
    pub delivery_address: Option<String>,
    /// Delivery postal code
    pub postal_code: Option<String>,
    /// Pickup location
    pub pickup_spot_id: Option<String>,
    /// Lines, in cart order
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Items plus shipping, in centavos
    #[must_use]
    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(NewOrderItem::subtotal).sum::<i64>() + self.shipping_cost
    }
}

/// Order database operations manager
pub struct OrderManager {
    pool: SqlitePool,
}

impl OrderManager {
    /// Create a new order manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a pending order with its items and the next order number
    ///
    /// # Errors
    ///
    /// Returns an error if the order has no items or an insert fails
    pub async fn create_order(&self, request: &NewOrder) -> AppResult<Order> {
        if request.items.is_empty() {
            return Err(AppError::invalid_input("An order needs at least one item"));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let total_amount = request.total_amount();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to count orders: {e}")))?;
        let order_number = format_order_number(existing + 1);

        sqlx::query(
            r"
            INSERT INTO orders (
                id, order_number, customer_id, total_amount, status, shipping_method,
                shipping_cost, delivery_address, postal_code, pickup_spot_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            ",
        )
        .bind(&id)
        .bind(&order_number)
        .bind(&request.customer_id)
        .bind(total_amount)
        .bind(OrderStatus::Pending.as_str())
        .bind(request.shipping_method.as_str())
        .bind(request.shipping_cost)
        .bind(&request.delivery_address)
        .bind(&request.postal_code)
        .bind(&request.pickup_spot_id)
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create order: {e}")))?;

        for item in &request.items {
            sqlx::query(
                r"
                INSERT INTO order_items (
                    id, order_id, meal_id, size_id, qty, unit_price, package_id, package_instance_id
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&id)
            .bind(&item.meal_id)
            .bind(&item.size_id)
            .bind(i64::from(item.qty))
            .bind(item.unit_price)
            .bind(&item.package_id)
            .bind(&item.package_instance_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create order item: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit order: {e}")))?;

        Ok(Order {
            id,
            order_number,
            conekta_order_id: None,
            customer_id: request.customer_id.clone(),
            total_amount,
            status: OrderStatus::Pending,
            shipping_method: request.shipping_method,
            shipping_cost: request.shipping_cost,
            delivery_address: request.delivery_address.clone(),
            postal_code: request.postal_code.clone(),
            pickup_spot_id: request.pickup_spot_id.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Store the payment gateway order id
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails or the order does not exist
    pub async fn set_gateway_order_id(
        &self,
        order_id: &str,
        gateway_order_id: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE orders SET conekta_order_id = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(gateway_order_id)
        .bind(Utc::now().to_rfc3339())
        .bind(order_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store gateway order id: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Order").with_resource_id(order_id));
        }

        Ok(())
    }

    /// Set the order status
    ///
    /// Returns `false` when no order has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE orders SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status.as_str())
            .bind(Utc::now().to_rfc3339())
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update order status: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Get an order by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_order(&self, order_id: &str) -> AppResult<Option<Order>> {
        let row = sqlx::query(
            r"
            SELECT id, order_number, conekta_order_id, customer_id, total_amount, status,
                   shipping_method, shipping_cost, delivery_address, postal_code,
                   pickup_spot_id, created_at, updated_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get order: {e}")))?;

        row.map(|r| row_to_order(&r)).transpose()
    }

    /// Items of an order joined with meal, size and package names
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_order_items(&self, order_id: &str) -> AppResult<Vec<OrderItemDetail>> {
        let rows = sqlx::query(
            r"
            SELECT oi.id, oi.order_id, oi.meal_id, oi.size_id, oi.qty, oi.unit_price,
                   oi.package_id, oi.package_instance_id,
                   m.name AS meal_name, s.name AS size_name, p.name AS package_name
            FROM order_items oi
            JOIN meals m ON m.id = oi.meal_id
            JOIN sizes s ON s.id = oi.size_id
            LEFT JOIN packages p ON p.id = oi.package_id
            WHERE oi.order_id = $1
            ORDER BY oi.rowid ASC
            ",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get order items: {e}")))?;

        rows.iter().map(row_to_item_detail).collect()
    }

    /// Order with customer, pickup spot and detailed items
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get_order_with_items(&self, order_id: &str) -> AppResult<Option<OrderWithItems>> {
        let Some(order) = self.get_order(order_id).await? else {
            return Ok(None);
        };

        let customer = CustomerManager::new(self.pool.clone())
            .get_customer(&order.customer_id)
            .await?;

        let pickup_spot = match &order.pickup_spot_id {
            Some(spot_id) => {
                PickupSpotManager::new(self.pool.clone())
                    .get_pickup_spot(spot_id)
                    .await?
            }
            None => None,
        };

        let items = self.get_order_items(order_id).await?;

        Ok(Some(OrderWithItems {
            order,
            customer,
            pickup_spot,
            items,
        }))
    }
}

fn row_to_order(row: &SqliteRow) -> AppResult<Order> {
    let status: String = column(row, "status")?;
    let shipping_method: String = column(row, "shipping_method")?;

    Ok(Order {
        id: column(row, "id")?,
        order_number: column(row, "order_number")?,
        conekta_order_id: column(row, "conekta_order_id")?,
        customer_id: column(row, "customer_id")?,
        total_amount: column(row, "total_amount")?,
        status: OrderStatus::parse(&status),
        shipping_method: ShippingMethod::parse(&shipping_method).ok_or_else(|| {
            AppError::database(format!("Unknown shipping method: {shipping_method}"))
        })?,
        shipping_cost: column(row, "shipping_cost")?,
        delivery_address: column(row, "delivery_address")?,
        postal_code: column(row, "postal_code")?,
        pickup_spot_id: column(row, "pickup_spot_id")?,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}

fn row_to_item_detail(row: &SqliteRow) -> AppResult<OrderItemDetail> {
    Ok(OrderItemDetail {
        item: OrderItem {
            id: column(row, "id")?,
            order_id: column(row, "order_id")?,
            meal_id: column(row, "meal_id")?,
            size_id: column(row, "size_id")?,
            qty: u32_column(row, "qty")?,
            unit_price: column(row, "unit_price")?,
            package_id: column(row, "package_id")?,
            package_instance_id: column(row, "package_instance_id")?,
        },
        meal_name: column(row, "meal_name")?,
        size_name: column(row, "size_name")?,
        package_name: column(row, "package_name")?,
    })
}
