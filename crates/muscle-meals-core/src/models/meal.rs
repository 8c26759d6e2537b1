// ABOUTME: Meal and package models for the storefront menu
// ABOUTME: A meal is one main recipe plus sub recipes; a package bundles N meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ingredient::Ingredient;
use super::recipe::Recipe;

/// Dish offered on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional image URL
    pub img: Option<String>,
    /// Recipe that scales with the size
    pub main_recipe_id: String,
    /// Whether the meal is on the menu
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Minimal meal data for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealBasic {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional image URL
    pub img: Option<String>,
}

impl From<Meal> for MealBasic {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            name: meal.name,
            description: meal.description,
            img: meal.img,
        }
    }
}

/// Meal with its recipe graph loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealWithRecipes {
    /// The meal row
    #[serde(flatten)]
    pub meal: Meal,
    /// Main recipe
    pub main_recipe: Recipe,
    /// Sub recipes in junction order
    pub sub_recipes: Vec<Recipe>,
    /// Every ingredient referenced by the recipes that exists in the catalog
    pub ingredients: Vec<Ingredient>,
}

/// Multi-meal bundle sold at the per-meal package price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional image URL
    pub img: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Number of meals the customer picks
    pub meals_included: u32,
    /// Whether the package is offered
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Package {
    /// Total price of this package for a per-meal package price
    #[must_use]
    pub fn total_price(&self, package_price: i64) -> i64 {
        package_price * i64::from(self.meals_included)
    }
}
