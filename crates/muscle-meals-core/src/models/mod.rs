// ABOUTME: Core data models for the Muscle Meals storefront
// ABOUTME: Re-exports catalog, size, customer, and order types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Catalog data (ingredients, recipes, meals, packages, catalog sizes) is
//! authored out of band and read by the storefront. Custom sizes, customers
//! and orders are written at checkout time.
//!
//! Money is always an `i64` amount of centavos (MXN). Gram targets are `u32`.

mod customer;
mod ingredient;
mod meal;
mod order;
mod recipe;
mod size;

// Catalog
pub use ingredient::{Ingredient, IngredientType, IngredientUnit, Macros};
pub use meal::{Meal, MealBasic, MealWithRecipes, Package};
pub use recipe::{Recipe, RecipeIngredient, RecipeKind};
pub use size::{PortionGrams, Size, SizeBasic};

// Customers and orders
pub use customer::{Customer, CustomerInfo, PickupSpot};
pub use order::{
    format_order_number, short_order_id, Order, OrderItem, OrderItemDetail, OrderStatus,
    OrderWithItems, ShippingMethod,
};
