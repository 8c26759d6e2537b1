// ABOUTME: Application constants organized by domain
// ABOUTME: Service names, portion limits, pricing tables, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by domain. Pricing bands and conversion
//! factors live here so that the calculation crate and the seed data agree.

/// Service identification
pub mod service_names {
    /// Name used in structured logs
    pub const MUSCLE_MEALS_SERVER: &str = "muscle-meals-server";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Maximum raw gram quantities a portion may request
pub mod portions {
    /// Protein upper bound (raw grams)
    pub const MAX_PROTEIN_GRAMS: u32 = 250;
    /// Carbohydrate upper bound (raw grams)
    pub const MAX_CARB_GRAMS: u32 = 100;
    /// Vegetable upper bound (raw grams)
    pub const MAX_VEGETABLE_GRAMS: u32 = 150;
    /// Quantities are multiples of this step
    pub const GRAM_STEP: u32 = 5;
    /// Longest custom size name, in characters
    pub const MAX_SIZE_NAME_CHARS: usize = 50;
}

/// Custom size pricing tables, in centavos
pub mod pricing {
    /// Protein thresholds (inclusive upper bound, base price)
    pub const PROTEIN_TIERS: [(u32, i64); 4] =
        [(160, 14_500), (180, 15_500), (220, 17_000), (250, 18_500)];

    /// Carb thresholds (inclusive upper bound, shifted delta)
    pub const CARB_DELTAS: [(u32, i64); 4] = [(49, 0), (60, 500), (79, 1_000), (100, 1_500)];

    /// Vegetable thresholds (inclusive upper bound, shifted delta)
    pub const VEGETABLE_DELTAS: [(u32, i64); 4] =
        [(59, 0), (80, 500), (119, 1_000), (150, 1_500)];

    /// Shift applied to the delta tables so the lowest band is a discount
    pub const DELTA_OFFSET: i64 = 500;

    /// Per-meal discount when bought inside a package
    pub const PACKAGE_DISCOUNT: i64 = 500;
}

/// Raw to cooked multiplicative factors
pub mod cooking {
    /// Protein loses water when cooked
    pub const PROTEIN_FACTOR: f64 = 0.81;
    /// Grains absorb water when cooked
    pub const CARB_FACTOR: f64 = 2.2;
    /// Vegetables are treated as unchanged
    pub const VEGETABLE_FACTOR: f64 = 1.0;
}

/// Order numbering and notification defaults
pub mod orders {
    /// Prefix of human-friendly order numbers (`MM-0001`)
    pub const ORDER_NUMBER_PREFIX: &str = "MM";
    /// Characters of the order id shown to customers
    pub const SHORT_ID_LEN: usize = 8;
    /// Hosted checkout lifetime in seconds
    pub const CHECKOUT_EXPIRY_SECS: i64 = 86_400;
    /// Currency of every amount in the storefront
    pub const CURRENCY: &str = "MXN";
    /// Largest quantity accepted on a single cart line
    pub const MAX_LINE_QTY: u32 = 100;
}

/// Environment variable names
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Public storefront URL used for payment redirects
    pub const PUBLIC_BASE_URL: &str = "PUBLIC_BASE_URL";
    /// Conekta API base URL
    pub const CONEKTA_API_URL: &str = "CONEKTA_API_URL";
    /// Conekta private API key
    pub const CONEKTA_PRIVATE_KEY: &str = "CONEKTA_PRIVATE_KEY";
    /// Conekta webhook signing secret
    pub const CONEKTA_WEBHOOK_SECRET: &str = "CONEKTA_WEBHOOK_SECRET";
    /// WhatsApp Cloud API phone number id
    pub const WHATSAPP_PHONE_ID: &str = "WHATSAPP_PHONE_ID";
    /// WhatsApp Cloud API access token
    pub const WHATSAPP_ACCESS_TOKEN: &str = "WHATSAPP_ACCESS_TOKEN";
    /// Business phone that receives internal order alerts
    pub const WHATSAPP_OWNER_PHONE: &str = "WHATSAPP_OWNER_PHONE";
    /// Standard shipping cost in centavos
    pub const SHIPPING_STANDARD_COST: &str = "SHIPPING_STANDARD_COST";
    /// Priority shipping cost in centavos
    pub const SHIPPING_PRIORITY_COST: &str = "SHIPPING_PRIORITY_COST";
    /// Comma separated postal codes excluded from delivery
    pub const DELIVERY_EXCLUDED_POSTAL_CODES: &str = "DELIVERY_EXCLUDED_POSTAL_CODES";
    /// Outbound HTTP request timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
    /// Outbound HTTP connect timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: &str = "HTTP_CLIENT_CONNECT_TIMEOUT_SECS";
    /// Browser origins allowed by CORS
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
}

/// Defaults applied when the environment is silent
pub mod defaults {
    /// SQLite file used outside tests
    pub const DATABASE_URL: &str = "sqlite:./data/muscle_meals.db";
    /// Storefront URL
    pub const PUBLIC_BASE_URL: &str = "http://localhost:3000";
    /// Conekta production API
    pub const CONEKTA_API_URL: &str = "https://api.conekta.io";
    /// Standard shipping, centavos
    pub const SHIPPING_STANDARD_COST: i64 = 5_000;
    /// Priority shipping, centavos
    pub const SHIPPING_PRIORITY_COST: i64 = 9_900;
    /// Outbound HTTP request timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
    /// Outbound HTTP connect timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: u64 = 10;
}
