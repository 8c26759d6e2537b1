// ABOUTME: Order models including status lifecycle and shipping methods
// ABOUTME: Defines Order, OrderItem, OrderStatus, ShippingMethod, and detailed views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::customer::{Customer, PickupSpot};
use crate::constants::orders::{ORDER_NUMBER_PREFIX, SHORT_ID_LEN};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, waiting for payment
    #[default]
    Pending,
    /// Payment confirmed
    Paid,
    /// Kitchen is preparing the order
    Preparing,
    /// Handed to the customer
    Delivered,
    /// Cancelled or expired
    Cancelled,
}

impl OrderStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Preparing => "preparing",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from database string representation
    ///
    /// Unknown values fall back to `Pending`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "paid" => Self::Paid,
            "preparing" => Self::Preparing,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Next delivery window
    Standard,
    /// Same-day delivery
    Priority,
    /// Customer collects at a pickup spot
    Pickup,
}

impl ShippingMethod {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Priority => "priority",
            Self::Pickup => "pickup",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(Self::Standard),
            "priority" => Some(Self::Priority),
            "pickup" => Some(Self::Pickup),
            _ => None,
        }
    }

    /// Label used in customer-facing messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Estándar",
            Self::Priority => "Prioritario",
            Self::Pickup => "Pickup (recoger en local)",
        }
    }
}

/// Placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: String,
    /// Human-friendly number (`MM-0001`)
    pub order_number: String,
    /// Payment gateway order id once the checkout was created
    pub conekta_order_id: Option<String>,
    /// Customer who placed the order
    pub customer_id: String,
    /// Items plus shipping, in centavos
    pub total_amount: i64,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Fulfilment method
    pub shipping_method: ShippingMethod,
    /// Shipping cost in centavos
    pub shipping_cost: i64,
    /// Single-line delivery address
    pub delivery_address: Option<String>,
    /// Delivery postal code
    pub postal_code: Option<String>,
    /// Pickup spot when collecting
    pub pickup_spot_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Uppercased id prefix shown to customers
    #[must_use]
    pub fn short_id(&self) -> String {
        short_order_id(&self.id)
    }
}

/// Uppercased prefix of an order id as shown in messages
#[must_use]
pub fn short_order_id(order_id: &str) -> String {
    order_id
        .chars()
        .take(SHORT_ID_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// Format the n-th order number, zero padded to four digits
#[must_use]
pub fn format_order_number(sequence: i64) -> String {
    format!("{ORDER_NUMBER_PREFIX}-{sequence:04}")
}

/// Line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Unique identifier
    pub id: String,
    /// Owning order
    pub order_id: String,
    /// Meal ordered
    pub meal_id: String,
    /// Size ordered
    pub size_id: String,
    /// Quantity
    pub qty: u32,
    /// Unit price charged, in centavos
    pub unit_price: i64,
    /// Package the meal belongs to
    pub package_id: Option<String>,
    /// Groups the meals of one package purchase
    pub package_instance_id: Option<String>,
}

impl OrderItem {
    /// Line subtotal in centavos
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.unit_price * i64::from(self.qty)
    }
}

/// Order item joined with display names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemDetail {
    /// The stored item
    #[serde(flatten)]
    pub item: OrderItem,
    /// Meal name
    pub meal_name: String,
    /// Size name
    pub size_name: String,
    /// Package name when part of a package
    pub package_name: Option<String>,
}

/// Order with customer, pickup spot, and detailed items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithItems {
    /// The order row
    #[serde(flatten)]
    pub order: Order,
    /// Customer, absent only if the row was deleted
    pub customer: Option<Customer>,
    /// Pickup spot for pickup orders
    pub pickup_spot: Option<PickupSpot>,
    /// Items in insertion order
    pub items: Vec<OrderItemDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_round_trip_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Preparing,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), status);
        }
        assert_eq!(OrderStatus::parse("refunded"), OrderStatus::Pending);
    }

    #[test]
    fn test_order_number_padding() {
        assert_eq!(format_order_number(1), "MM-0001");
        assert_eq!(format_order_number(42), "MM-0042");
        assert_eq!(format_order_number(12_345), "MM-12345");
    }

    #[test]
    fn test_short_order_id() {
        assert_eq!(short_order_id("3f2a9c1e-aaaa-bbbb"), "3F2A9C1E");
        assert_eq!(short_order_id("abc"), "ABC");
    }
}
