// ABOUTME: Ingredient models with per-100-unit macro profiles
// ABOUTME: Defines Ingredient, IngredientType, IngredientUnit, and Macros
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Portion category of an ingredient
///
/// Typed ingredients in a main recipe take their quantity from the selected
/// size instead of the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientType {
    /// Protein source (chicken, beef, fish)
    #[serde(rename = "pro")]
    Protein,
    /// Carbohydrate source (rice, pasta, oats)
    #[serde(rename = "carb")]
    Carb,
    /// Vegetables
    #[serde(rename = "veg")]
    Vegetable,
}

impl IngredientType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Protein => "pro",
            Self::Carb => "carb",
            Self::Vegetable => "veg",
        }
    }

    /// Parse from database string representation
    ///
    /// Unknown values are treated as untyped.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pro" | "protein" => Some(Self::Protein),
            "carb" | "carbs" => Some(Self::Carb),
            "veg" | "vegetable" => Some(Self::Vegetable),
            _ => None,
        }
    }
}

/// Unit of measure used when authoring recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IngredientUnit {
    /// Grams
    #[default]
    #[serde(rename = "g")]
    Grams,
    /// Milliliters
    #[serde(rename = "ml")]
    Milliliters,
    /// Whole pieces
    #[serde(rename = "pz")]
    Pieces,
    /// Teaspoons
    #[serde(rename = "tsp")]
    Teaspoons,
    /// Tablespoons
    #[serde(rename = "tbsp")]
    Tablespoons,
}

impl IngredientUnit {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Milliliters => "ml",
            Self::Pieces => "pz",
            Self::Teaspoons => "tsp",
            Self::Tablespoons => "tbsp",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "ml" => Self::Milliliters,
            "pz" => Self::Pieces,
            "tsp" => Self::Teaspoons,
            "tbsp" => Self::Tablespoons,
            // Default to grams for unrecognized values
            _ => Self::Grams,
        }
    }
}

/// Calories and macronutrients
///
/// Used both for ingredient profiles (per 100 units) and computed meal totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Macros {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fats: f64,
}

impl Macros {
    /// All-zero macros
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
        }
    }
}

/// Base ingredient with macros per 100 units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Portion category, `None` when the quantity never scales
    #[serde(rename = "type")]
    pub ingredient_type: Option<IngredientType>,
    /// kcal per 100 units
    pub calories: f64,
    /// Protein grams per 100 units
    pub protein: f64,
    /// Carbohydrate grams per 100 units
    pub carbs: f64,
    /// Fat grams per 100 units
    pub fats: f64,
    /// Unit of measure
    pub unit: IngredientUnit,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Ingredient {
    /// Macro profile per 100 units
    #[must_use]
    pub const fn macros_per_100(&self) -> Macros {
        Macros {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        }
    }
}
