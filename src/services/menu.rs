// ABOUTME: Menu read operations shared by the storefront routes
// ABOUTME: Active meals, meal detail with macros per size, sizes, packages and pickup spots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Macros, MealBasic, MealWithRecipes, Package, PickupSpot, Size, SizeBasic};
use muscle_meals_calc::{calculate_meal_macros, format_macros, index_ingredients};
use serde::Serialize;

/// Macros of a meal at one size
#[derive(Debug, Clone, Serialize)]
pub struct SizeMacros {
    /// Size the macros were computed for
    pub size: SizeBasic,
    /// Totals rounded to one decimal
    pub macros: Macros,
    /// Display line such as `480 kcal · 45g pro · 50g carb · 10g fat`
    pub summary: String,
}

/// Meal detail page data
#[derive(Debug, Clone, Serialize)]
pub struct MealDetail {
    /// Meal with recipes and ingredient table
    #[serde(flatten)]
    pub meal: MealWithRecipes,
    /// Macros for every catalog size, cheapest first
    pub macros_by_size: Vec<SizeMacros>,
}

/// Package with the total for a chosen size
#[derive(Debug, Clone, Serialize)]
pub struct PackageDetail {
    /// The package
    #[serde(flatten)]
    pub package: Package,
    /// Size the price was computed for
    pub size: Option<SizeBasic>,
    /// `package_price * meals_included` in centavos
    pub total_price: Option<i64>,
}

/// Meals currently on the menu
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_menu(database: &Database) -> AppResult<Vec<MealBasic>> {
    let meals = database.catalog().list_active_meals().await?;
    Ok(meals.into_iter().map(MealBasic::from).collect())
}

/// Active meal with recipes and macros for every catalog size
///
/// # Errors
///
/// Returns `ResourceNotFound` when the meal does not exist or is inactive
pub async fn meal_detail(database: &Database, meal_id: &str) -> AppResult<MealDetail> {
    let meal = load_active_meal(database, meal_id).await?;
    let sizes = database.sizes().list_main_sizes().await?;

    let macros_by_size = sizes
        .iter()
        .map(|size| macros_for_size(&meal, size))
        .collect();

    Ok(MealDetail {
        meal,
        macros_by_size,
    })
}

/// Macros of a meal for any size, catalog or custom
///
/// # Errors
///
/// Returns `ResourceNotFound` when the meal or the size does not exist
pub async fn meal_macros(
    database: &Database,
    meal_id: &str,
    size_id: &str,
) -> AppResult<SizeMacros> {
    let meal = load_active_meal(database, meal_id).await?;
    let size = find_size(database, size_id).await?;

    Ok(macros_for_size(&meal, &size))
}

/// Catalog sizes ordered by price
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn main_sizes(database: &Database) -> AppResult<Vec<Size>> {
    database.sizes().list_main_sizes().await
}

/// Custom sizes saved by a customer
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn custom_sizes(database: &Database, customer_id: &str) -> AppResult<Vec<Size>> {
    database.sizes().list_custom_sizes(customer_id).await
}

/// Size by id
///
/// # Errors
///
/// Returns `ResourceNotFound` when no size has this id
pub async fn find_size(database: &Database, size_id: &str) -> AppResult<Size> {
    database
        .sizes()
        .get_size(size_id)
        .await?
        .ok_or_else(|| AppError::not_found("Size").with_resource_id(size_id))
}

/// Packages on offer ordered by name
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn active_packages(database: &Database) -> AppResult<Vec<Package>> {
    database.catalog().list_active_packages().await
}

/// Active package, priced when a size is given
///
/// # Errors
///
/// Returns `ResourceNotFound` when the package is missing or inactive, or
/// the size does not exist
pub async fn package_detail(
    database: &Database,
    package_id: &str,
    size_id: Option<&str>,
) -> AppResult<PackageDetail> {
    let package = database
        .catalog()
        .get_package(package_id)
        .await?
        .filter(|package| package.active)
        .ok_or_else(|| AppError::not_found("Package").with_resource_id(package_id))?;

    let size = match size_id {
        Some(size_id) => Some(find_size(database, size_id).await?),
        None => None,
    };
    let total_price = size
        .as_ref()
        .map(|size| package.total_price(size.package_price));

    Ok(PackageDetail {
        package,
        size: size.as_ref().map(SizeBasic::from),
        total_price,
    })
}

/// Pickup spots open for collection
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn active_pickup_spots(database: &Database) -> AppResult<Vec<PickupSpot>> {
    database.pickup_spots().list_active().await
}

async fn load_active_meal(database: &Database, meal_id: &str) -> AppResult<MealWithRecipes> {
    database
        .catalog()
        .get_meal_with_recipes(meal_id)
        .await?
        .filter(|meal| meal.meal.active)
        .ok_or_else(|| AppError::not_found("Meal").with_resource_id(meal_id))
}

fn macros_for_size(meal: &MealWithRecipes, size: &Size) -> SizeMacros {
    let lookup = index_ingredients(meal.ingredients.iter().cloned());
    let macros = calculate_meal_macros(
        &meal.main_recipe,
        &meal.sub_recipes,
        &lookup,
        &size.portion(),
    );

    SizeMacros {
        size: SizeBasic::from(size),
        summary: format_macros(&macros),
        macros,
    }
}
