// ABOUTME: Customer and pickup spot models
// ABOUTME: Customers are keyed by email; pickup spots are fulfilment locations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shopper who placed at least one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: String,
    /// Full name as typed at checkout
    pub full_name: String,
    /// Email address, unique across customers
    pub email: String,
    /// Ten digit phone number
    pub phone: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Contact data captured by the checkout form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number, any formatting
    pub phone: String,
}

/// Location where customers collect orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupSpot {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Opening hours, free text
    pub schedule: Option<String>,
    /// Zone label
    pub zone: Option<String>,
    /// Whether customers may select it
    pub active: bool,
}
