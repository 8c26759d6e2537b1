// ABOUTME: Pure calculation helpers for the Muscle Meals storefront
// ABOUTME: Macro totals, size pricing tiers, cooking conversion, and postal zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Muscle Meals Calc
//!
//! Synchronous, side-effect free functions over already loaded records.
//! Nothing here returns an error: unknown ingredients are skipped and
//! out-of-range gram inputs fall into the top price band.

/// Contact and address formatting helpers
pub mod address;
/// Raw to cooked gram conversion
pub mod conversion;
/// Meal macro totals
pub mod macros;
/// Portion limits and rounding for custom sizes
pub mod portion;
/// Custom size price tiers
pub mod pricing;
/// Delivery zone lookup by postal code
pub mod zones;

pub use address::{is_valid_phone, is_well_formed_postal_code, whatsapp_phone, DeliveryAddress};
pub use conversion::{cooking_factor, to_cooked, to_raw, CookedPortion};
pub use macros::{calculate_meal_macros, format_macros, index_ingredients, IngredientLookup};
pub use portion::PortionLimits;
pub use pricing::{calculate_custom_size_price, CustomSizePrice};
pub use zones::{
    is_valid_postal_code, zone_by_postal_code, DeliveryZone, ZoneTable, DEFAULT_ZONE_LABEL,
};
