// ABOUTME: Limits and step rounding applied to custom portion sizes
// ABOUTME: Quantities are rounded to multiples of 5 grams then clamped to a maximum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use muscle_meals_core::constants::portions::{
    GRAM_STEP, MAX_CARB_GRAMS, MAX_PROTEIN_GRAMS, MAX_VEGETABLE_GRAMS,
};
use muscle_meals_core::models::{IngredientType, PortionGrams};

use crate::conversion::to_raw;

/// Upper bounds for raw gram targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortionLimits {
    /// Maximum raw protein grams
    pub protein: u32,
    /// Maximum raw carbohydrate grams
    pub carb: u32,
    /// Maximum raw vegetable grams
    pub vegetable: u32,
}

impl Default for PortionLimits {
    fn default() -> Self {
        Self {
            protein: MAX_PROTEIN_GRAMS,
            carb: MAX_CARB_GRAMS,
            vegetable: MAX_VEGETABLE_GRAMS,
        }
    }
}

impl PortionLimits {
    /// Maximum grams for an ingredient type
    #[must_use]
    pub const fn max_for(&self, ingredient_type: IngredientType) -> u32 {
        match ingredient_type {
            IngredientType::Protein => self.protein,
            IngredientType::Carb => self.carb,
            IngredientType::Vegetable => self.vegetable,
        }
    }

    /// Round one quantity to the gram step and clamp it to `[0, max]`
    #[must_use]
    pub fn clamp_grams(&self, grams: f64, ingredient_type: IngredientType) -> u32 {
        let max = self.max_for(ingredient_type);
        if !grams.is_finite() || grams <= 0.0 {
            return 0;
        }
        let step = f64::from(GRAM_STEP);
        let stepped = (grams / step).round() * step;
        if stepped >= f64::from(max) {
            max
        } else {
            stepped as u32
        }
    }

    /// Normalize raw requested grams into a storable portion
    #[must_use]
    pub fn normalize(&self, protein: f64, carb: f64, veg: f64) -> PortionGrams {
        PortionGrams::new(
            self.clamp_grams(protein, IngredientType::Protein),
            self.clamp_grams(carb, IngredientType::Carb),
            self.clamp_grams(veg, IngredientType::Vegetable),
        )
    }

    /// Raw grams for a cooked quantity, stepped and clamped
    #[must_use]
    pub fn from_cooked(&self, cooked_grams: u32, ingredient_type: IngredientType) -> u32 {
        self.clamp_grams(
            f64::from(to_raw(cooked_grams, ingredient_type)),
            ingredient_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_steps_and_clamps() {
        let limits = PortionLimits::default();
        let portion = limits.normalize(183.0, 57.5, 400.0);
        assert_eq!(portion, PortionGrams::new(185, 60, 150));
    }

    #[test]
    fn test_negative_and_nan_become_zero() {
        let limits = PortionLimits::default();
        assert_eq!(limits.clamp_grams(-20.0, IngredientType::Protein), 0);
        assert_eq!(limits.clamp_grams(f64::NAN, IngredientType::Carb), 0);
    }

    #[test]
    fn test_from_cooked() {
        let limits = PortionLimits::default();
        // 146 cooked protein -> 180 raw
        assert_eq!(limits.from_cooked(146, IngredientType::Protein), 180);
        // 500 cooked carbs -> 227 raw, clamped to 100
        assert_eq!(limits.from_cooked(500, IngredientType::Carb), 100);
    }
}
