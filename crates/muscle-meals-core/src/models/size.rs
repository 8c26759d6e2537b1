// ABOUTME: Portion size profiles for meals and packages
// ABOUTME: Catalog and custom sizes share one record type with a discriminant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ingredient::IngredientType;

/// Raw gram targets for each ingredient type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PortionGrams {
    /// Raw protein grams
    pub protein_qty: u32,
    /// Raw carbohydrate grams
    pub carb_qty: u32,
    /// Raw vegetable grams
    pub veg_qty: u32,
}

impl PortionGrams {
    /// Create a portion profile
    #[must_use]
    pub const fn new(protein_qty: u32, carb_qty: u32, veg_qty: u32) -> Self {
        Self {
            protein_qty,
            carb_qty,
            veg_qty,
        }
    }

    /// Grams assigned to an ingredient type
    #[must_use]
    pub const fn for_type(&self, ingredient_type: IngredientType) -> u32 {
        match ingredient_type {
            IngredientType::Protein => self.protein_qty,
            IngredientType::Carb => self.carb_qty,
            IngredientType::Vegetable => self.veg_qty,
        }
    }
}

/// Named portion profile (LOW, FIT, PLUS, or a custom name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// `true` for catalog sizes, `false` for custom ones
    pub is_main: bool,
    /// Owner of a custom size, `None` for catalog and anonymous sizes
    pub customer_id: Option<String>,
    /// Raw protein grams
    pub protein_qty: u32,
    /// Raw carbohydrate grams
    pub carb_qty: u32,
    /// Raw vegetable grams
    pub veg_qty: u32,
    /// Single meal price in centavos
    pub price: i64,
    /// Per-meal price inside a package in centavos
    pub package_price: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Size {
    /// Whether this size was created on demand by a shopper
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        !self.is_main
    }

    /// Gram quantities of this size
    #[must_use]
    pub const fn portion(&self) -> PortionGrams {
        PortionGrams::new(self.protein_qty, self.carb_qty, self.veg_qty)
    }

    /// Grams assigned to an ingredient type
    #[must_use]
    pub const fn grams_for(&self, ingredient_type: IngredientType) -> u32 {
        self.portion().for_type(ingredient_type)
    }
}

/// Minimal size data for selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBasic {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Single meal price in centavos
    pub price: i64,
    /// Per-meal price inside a package in centavos
    pub package_price: i64,
}

impl From<&Size> for SizeBasic {
    fn from(size: &Size) -> Self {
        Self {
            id: size.id.clone(),
            name: size.name.clone(),
            price: size.price,
            package_price: size.package_price,
        }
    }
}
