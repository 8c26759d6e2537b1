// ABOUTME: Recipe models for meal composition
// ABOUTME: Defines Recipe, RecipeKind, and RecipeIngredient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ingredient::IngredientUnit;

/// Whether a recipe scales with the selected size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    /// Base of the dish, typed ingredient quantities follow the size
    #[default]
    Main,
    /// Sauce or garnish, quantities are always used as authored
    Sub,
}

impl RecipeKind {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Sub => "sub",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "sub" => Self::Sub,
            _ => Self::Main,
        }
    }
}

/// Ingredient reference with the quantity written in a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Referenced ingredient
    pub ingredient_id: String,
    /// Authored quantity
    pub qty: f64,
    /// Authored unit
    pub unit: IngredientUnit,
}

impl RecipeIngredient {
    /// Create a recipe line measured in grams
    #[must_use]
    pub fn grams(ingredient_id: impl Into<String>, qty: f64) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            qty,
            unit: IngredientUnit::Grams,
        }
    }
}

/// Ordered collection of ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Main or sub recipe
    #[serde(rename = "type")]
    pub kind: RecipeKind,
    /// Lines in authored order
    pub ingredients: Vec<RecipeIngredient>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
