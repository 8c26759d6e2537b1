// ABOUTME: Price tiers for custom portion sizes
// ABOUTME: Protein selects the base price, carbs and vegetables add shifted deltas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use muscle_meals_core::constants::pricing::{
    CARB_DELTAS, DELTA_OFFSET, PACKAGE_DISCOUNT, PROTEIN_TIERS, VEGETABLE_DELTAS,
};
use muscle_meals_core::models::PortionGrams;

/// Prices of a custom size in centavos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSizePrice {
    /// Single meal price
    pub price: i64,
    /// Per-meal price inside a package
    pub package_price: i64,
}

/// Price a custom portion
///
/// Quantities above the top threshold of a table use the top band.
#[must_use]
pub fn calculate_custom_size_price(portion: &PortionGrams) -> CustomSizePrice {
    let base = band_value(&PROTEIN_TIERS, portion.protein_qty);
    let carb_delta = band_value(&CARB_DELTAS, portion.carb_qty) - DELTA_OFFSET;
    let veg_delta = band_value(&VEGETABLE_DELTAS, portion.veg_qty) - DELTA_OFFSET;

    let price = base + carb_delta + veg_delta;
    CustomSizePrice {
        price,
        package_price: price - PACKAGE_DISCOUNT,
    }
}

/// Value of the first band whose inclusive upper bound covers `grams`
fn band_value(bands: &[(u32, i64)], grams: u32) -> i64 {
    bands
        .iter()
        .find(|(max, _)| grams <= *max)
        .or_else(|| bands.last())
        .map_or(0, |(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_profile_price() {
        let quote = calculate_custom_size_price(&PortionGrams::new(180, 55, 70));
        // 15500 base, carb band 500 - 500, veg band 500 - 500
        assert_eq!(quote.price, 15_500);
        assert_eq!(quote.package_price, 15_000);
    }

    #[test]
    fn test_lowest_bands_are_discounts() {
        let quote = calculate_custom_size_price(&PortionGrams::new(100, 0, 0));
        assert_eq!(quote.price, 14_500 - 500 - 500);
    }

    #[test]
    fn test_above_top_threshold_clamps() {
        let top = calculate_custom_size_price(&PortionGrams::new(250, 100, 150));
        let beyond = calculate_custom_size_price(&PortionGrams::new(900, 400, 700));
        assert_eq!(top, beyond);
        assert_eq!(top.price, 18_500 + 1_000 + 1_000);
    }
}
