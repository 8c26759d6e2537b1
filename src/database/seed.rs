// ABOUTME: Demo catalog seeding for local development and integration tests
// ABOUTME: Creates ingredients, recipes, meals, catalog sizes, packages and pickup spots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Database, NewIngredient, NewMeal, NewPackage, NewPickupSpot, NewRecipe, NewSize};
use crate::errors::{AppError, AppResult};
use crate::models::{IngredientType, IngredientUnit, PortionGrams, RecipeIngredient, RecipeKind};
use muscle_meals_calc::calculate_custom_size_price;
use tracing::info;

/// Identifiers of the seeded records
#[derive(Debug, Clone)]
pub struct SeededCatalog {
    /// Chicken, rice and broccoli with chipotle sauce
    pub chicken_meal_id: String,
    /// Lean beef, sweet potato and zucchini
    pub beef_meal_id: String,
    /// Inactive meal hidden from the menu
    pub retired_meal_id: String,
    /// `LOW` catalog size
    pub low_size_id: String,
    /// `FIT` catalog size
    pub fit_size_id: String,
    /// `PLUS` catalog size
    pub plus_size_id: String,
    /// Five-meal package
    pub package_5_id: String,
    /// Ten-meal package
    pub package_10_id: String,
    /// Active pickup spot
    pub pickup_spot_id: String,
    /// Inactive pickup spot
    pub closed_pickup_spot_id: String,
}

struct IngredientSeed {
    name: &'static str,
    ingredient_type: Option<IngredientType>,
    macros: [f64; 4],
    unit: IngredientUnit,
}

const INGREDIENTS: [IngredientSeed; 8] = [
    IngredientSeed {
        name: "Pechuga de pollo",
        ingredient_type: Some(IngredientType::Protein),
        macros: [165.0, 31.0, 0.0, 3.6],
        unit: IngredientUnit::Grams,
    },
    IngredientSeed {
        name: "Arroz blanco",
        ingredient_type: Some(IngredientType::Carb),
        macros: [365.0, 7.1, 80.0, 0.7],
        unit: IngredientUnit::Grams,
    },
    IngredientSeed {
        name: "Brócoli",
        ingredient_type: Some(IngredientType::Vegetable),
        macros: [34.0, 2.8, 7.0, 0.4],
        unit: IngredientUnit::Grams,
    },
    IngredientSeed {
        name: "Aceite de oliva",
        ingredient_type: None,
        macros: [884.0, 0.0, 0.0, 100.0],
        unit: IngredientUnit::Milliliters,
    },
    IngredientSeed {
        name: "Salsa chipotle",
        ingredient_type: None,
        macros: [120.0, 1.5, 6.0, 10.0],
        unit: IngredientUnit::Grams,
    },
    IngredientSeed {
        name: "Res magra",
        ingredient_type: Some(IngredientType::Protein),
        macros: [137.0, 21.0, 0.0, 5.5],
        unit: IngredientUnit::Grams,
    },
    IngredientSeed {
        name: "Camote",
        ingredient_type: Some(IngredientType::Carb),
        macros: [86.0, 1.6, 20.0, 0.1],
        unit: IngredientUnit::Grams,
    },
    IngredientSeed {
        name: "Calabacita",
        ingredient_type: Some(IngredientType::Vegetable),
        macros: [17.0, 1.2, 3.1, 0.3],
        unit: IngredientUnit::Grams,
    },
];

/// Catalog sizes as (name, protein, carb, vegetable)
const CATALOG_SIZES: [(&str, u32, u32, u32); 3] =
    [("LOW", 160, 50, 60), ("FIT", 180, 55, 70), ("PLUS", 220, 80, 120)];

/// Seed the demo catalog
///
/// # Errors
///
/// Returns an error if any insert fails, including duplicate catalog size
/// names when the catalog was already seeded
pub async fn seed_demo_catalog(database: &Database) -> AppResult<SeededCatalog> {
    let catalog = database.catalog();

    let mut ingredient_ids = Vec::with_capacity(INGREDIENTS.len());
    for seed in &INGREDIENTS {
        let [calories, protein, carbs, fats] = seed.macros;
        let ingredient = catalog
            .create_ingredient(&NewIngredient {
                name: seed.name.to_owned(),
                description: None,
                ingredient_type: seed.ingredient_type,
                calories,
                protein,
                carbs,
                fats,
                unit: seed.unit,
            })
            .await?;
        ingredient_ids.push(ingredient.id);
    }
    let [chicken, rice, broccoli, oil, chipotle, beef, sweet_potato, zucchini] =
        ingredient_ids.as_slice()
    else {
        return Err(AppError::internal("Unexpected ingredient seed count"));
    };

    let sauce = catalog
        .create_recipe(&NewRecipe {
            name: "Salsa chipotle".to_owned(),
            description: Some("Salsa cremosa de chipotle".to_owned()),
            kind: RecipeKind::Sub,
            ingredients: vec![RecipeIngredient::grams(chipotle, 30.0)],
        })
        .await?;

    let chicken_recipe = catalog
        .create_recipe(&NewRecipe {
            name: "Pollo con arroz".to_owned(),
            description: None,
            kind: RecipeKind::Main,
            ingredients: vec![
                RecipeIngredient::grams(chicken, 150.0),
                RecipeIngredient::grams(rice, 50.0),
                RecipeIngredient::grams(broccoli, 60.0),
                RecipeIngredient {
                    ingredient_id: oil.clone(),
                    qty: 5.0,
                    unit: IngredientUnit::Milliliters,
                },
            ],
        })
        .await?;

    let beef_recipe = catalog
        .create_recipe(&NewRecipe {
            name: "Res con camote".to_owned(),
            description: None,
            kind: RecipeKind::Main,
            ingredients: vec![
                RecipeIngredient::grams(beef, 150.0),
                RecipeIngredient::grams(sweet_potato, 50.0),
                RecipeIngredient::grams(zucchini, 60.0),
            ],
        })
        .await?;

    let chicken_meal = catalog
        .create_meal(&NewMeal {
            name: "Pollo chipotle".to_owned(),
            description: Some("Pechuga a la plancha con arroz, brócoli y salsa chipotle".to_owned()),
            img: Some("/img/meals/pollo-chipotle.jpg".to_owned()),
            main_recipe_id: chicken_recipe.id,
            sub_recipe_ids: vec![sauce.id],
            active: true,
        })
        .await?;

    let beef_meal = catalog
        .create_meal(&NewMeal {
            name: "Res con camote".to_owned(),
            description: Some("Res magra con camote rostizado y calabacita".to_owned()),
            img: Some("/img/meals/res-camote.jpg".to_owned()),
            main_recipe_id: beef_recipe.id.clone(),
            sub_recipe_ids: Vec::new(),
            active: true,
        })
        .await?;

    let retired_meal = catalog
        .create_meal(&NewMeal {
            name: "Res temporada".to_owned(),
            description: None,
            img: None,
            main_recipe_id: beef_recipe.id,
            sub_recipe_ids: Vec::new(),
            active: false,
        })
        .await?;

    let sizes = database.sizes();
    let mut size_ids = Vec::with_capacity(CATALOG_SIZES.len());
    for (name, protein, carb, veg) in CATALOG_SIZES {
        let portion = PortionGrams::new(protein, carb, veg);
        let price = calculate_custom_size_price(&portion);
        let size = sizes
            .create_size(&NewSize {
                name: name.to_owned(),
                is_main: true,
                customer_id: None,
                portion,
                price: price.price,
                package_price: price.package_price,
            })
            .await?;
        size_ids.push(size.id);
    }
    let [low_size_id, fit_size_id, plus_size_id] = size_ids.as_slice() else {
        return Err(AppError::internal("Unexpected catalog size count"));
    };

    let package_5 = catalog
        .create_package(&NewPackage {
            name: "Paquete 5 comidas".to_owned(),
            img: Some("/img/packages/5.jpg".to_owned()),
            description: Some("Elige 5 comidas para tu semana".to_owned()),
            meals_included: 5,
            active: true,
        })
        .await?;

    let package_10 = catalog
        .create_package(&NewPackage {
            name: "Paquete 10 comidas".to_owned(),
            img: Some("/img/packages/10.jpg".to_owned()),
            description: Some("Comida y cena de lunes a viernes".to_owned()),
            meals_included: 10,
            active: true,
        })
        .await?;

    let spots = database.pickup_spots();
    let pickup_spot = spots
        .create_pickup_spot(&NewPickupSpot {
            name: "Muscle Meals Cumbres".to_owned(),
            address: "Av. Paseo de los Leones 1200, Cumbres, Monterrey, N.L.".to_owned(),
            schedule: Some("Lunes a viernes 9:00 - 19:00".to_owned()),
            zone: Some("Monterrey".to_owned()),
            active: true,
        })
        .await?;

    let closed_spot = spots
        .create_pickup_spot(&NewPickupSpot {
            name: "Muscle Meals Valle".to_owned(),
            address: "Calzada del Valle 400, San Pedro Garza García, N.L.".to_owned(),
            schedule: None,
            zone: Some("San Pedro Garza García".to_owned()),
            active: false,
        })
        .await?;

    info!(
        meals = 3,
        sizes = CATALOG_SIZES.len(),
        packages = 2,
        "Demo catalog seeded"
    );

    Ok(SeededCatalog {
        chicken_meal_id: chicken_meal.id,
        beef_meal_id: beef_meal.id,
        retired_meal_id: retired_meal.id,
        low_size_id: low_size_id.clone(),
        fit_size_id: fit_size_id.clone(),
        plus_size_id: plus_size_id.clone(),
        package_5_id: package_5.id,
        package_10_id: package_10.id,
        pickup_spot_id: pickup_spot.id,
        closed_pickup_spot_id: closed_spot.id,
    })
}
