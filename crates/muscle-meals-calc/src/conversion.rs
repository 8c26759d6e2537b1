// ABOUTME: Raw to cooked gram conversion per ingredient type
// ABOUTME: Fixed multiplicative factors; round trips are exact only within rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use muscle_meals_core::constants::cooking::{CARB_FACTOR, PROTEIN_FACTOR, VEGETABLE_FACTOR};
use muscle_meals_core::models::{IngredientType, PortionGrams};

/// Multiplicative raw to cooked factor for an ingredient type
#[must_use]
pub const fn cooking_factor(ingredient_type: IngredientType) -> f64 {
    match ingredient_type {
        IngredientType::Protein => PROTEIN_FACTOR,
        IngredientType::Carb => CARB_FACTOR,
        IngredientType::Vegetable => VEGETABLE_FACTOR,
    }
}

/// Estimated cooked grams for a raw quantity
#[must_use]
pub fn to_cooked(raw_grams: u32, ingredient_type: IngredientType) -> u32 {
    (f64::from(raw_grams) * cooking_factor(ingredient_type)).round() as u32
}

/// Raw grams needed for a cooked quantity
#[must_use]
pub fn to_raw(cooked_grams: u32, ingredient_type: IngredientType) -> u32 {
    (f64::from(cooked_grams) / cooking_factor(ingredient_type)).round() as u32
}

/// Cooked view of a raw portion, as shown to shoppers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookedPortion {
    /// Cooked protein grams
    pub protein: u32,
    /// Cooked carbohydrate grams
    pub carb: u32,
    /// Cooked vegetable grams
    pub veg: u32,
}

impl CookedPortion {
    /// Convert every field of a raw portion
    #[must_use]
    pub fn from_raw(portion: &PortionGrams) -> Self {
        Self {
            protein: to_cooked(portion.protein_qty, IngredientType::Protein),
            carb: to_cooked(portion.carb_qty, IngredientType::Carb),
            veg: to_cooked(portion.veg_qty, IngredientType::Vegetable),
        }
    }
}
