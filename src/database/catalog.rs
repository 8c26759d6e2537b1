// ABOUTME: Database operations for the meal catalog
// ABOUTME: Handles ingredients, recipes with ordered ingredient lists, meals and packages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{column, timestamp_column, u32_column};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Ingredient, IngredientType, IngredientUnit, Meal, MealWithRecipes, Package, Recipe,
    RecipeIngredient, RecipeKind,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

/// Request to create an ingredient
#[derive(Debug, Clone, Deserialize)]
pub struct NewIngredient {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Portion category, `None` for condiments and oils
    pub ingredient_type: Option<IngredientType>,
    /// Calories per 100 units
    pub calories: f64,
    /// Protein grams per 100 units
    pub protein: f64,
    /// Carbohydrate grams per 100 units
    pub carbs: f64,
    /// Fat grams per 100 units
    pub fats: f64,
    /// Measurement unit
    pub unit: IngredientUnit,
}

/// Request to create a recipe
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Main or sub recipe
    pub kind: RecipeKind,
    /// Ingredients in preparation order
    pub ingredients: Vec<RecipeIngredient>,
}

/// Request to create a meal
#[derive(Debug, Clone, Deserialize)]
pub struct NewMeal {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Image URL
    pub img: Option<String>,
    /// The single main recipe
    pub main_recipe_id: String,
    /// Sauces and sides, in display order
    pub sub_recipe_ids: Vec<String>,
    /// Whether the meal is offered
    pub active: bool,
}

/// Request to create a package
#[derive(Debug, Clone, Deserialize)]
pub struct NewPackage {
    /// Display name
    pub name: String,
    /// Image URL
    pub img: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Meals the customer picks
    pub meals_included: u32,
    /// Whether the package is offered
    pub active: bool,
}

/// Catalog database operations manager
pub struct CatalogManager {
    pool: SqlitePool,
}

impl CatalogManager {
    /// Create a new catalog manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ================================================================================
    // Ingredients
    // ================================================================================

    /// Create an ingredient
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_ingredient(&self, request: &NewIngredient) -> AppResult<Ingredient> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO ingredients (id, name, description, type, calories, protein, carbs, fats, unit, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.ingredient_type.map(|t| t.as_str()))
        .bind(request.calories)
        .bind(request.protein)
        .bind(request.carbs)
        .bind(request.fats)
        .bind(request.unit.as_str())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ingredient: {e}")))?;

        Ok(Ingredient {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            ingredient_type: request.ingredient_type,
            calories: request.calories,
            protein: request.protein,
            carbs: request.carbs,
            fats: request.fats,
            unit: request.unit,
            created_at: now,
        })
    }

    /// List every ingredient ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, type, calories, protein, carbs, fats, unit, created_at
            FROM ingredients
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }

    /// Ingredients referenced by a meal's main and sub recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn ingredients_for_meal(&self, meal_id: &str) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query(
            r"
            SELECT DISTINCT i.id, i.name, i.description, i.type, i.calories, i.protein,
                   i.carbs, i.fats, i.unit, i.created_at
            FROM ingredients i
            JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
            WHERE ri.recipe_id IN (
                SELECT main_recipe_id FROM meals WHERE id = $1
                UNION
                SELECT recipe_id FROM meal_sub_recipes WHERE meal_id = $1
            )
            ORDER BY i.name ASC
            ",
        )
        .bind(meal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get meal ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }

    // ================================================================================
    // Recipes
    // ================================================================================

    /// Create a recipe with its ordered ingredient list
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or an ingredient id does not exist
    pub async fn create_recipe(&self, request: &NewRecipe) -> AppResult<Recipe> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO recipes (id, name, description, type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.kind.as_str())
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        for (position, ingredient) in request.ingredients.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO recipe_ingredients (recipe_id, position, ingredient_id, qty, unit)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(&id)
            .bind(position as i64)
            .bind(&ingredient.ingredient_id)
            .bind(ingredient.qty)
            .bind(ingredient.unit.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to add recipe ingredient: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        Ok(Recipe {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            kind: request.kind,
            ingredients: request.ingredients.clone(),
            created_at: now,
        })
    }

    /// Get a recipe with its ingredients in order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_recipe(&self, recipe_id: &str) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, name, description, type, created_at
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let ingredient_rows = sqlx::query(
            r"
            SELECT ingredient_id, qty, unit
            FROM recipe_ingredients
            WHERE recipe_id = $1
            ORDER BY position ASC
            ",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe ingredients: {e}")))?;

        let ingredients = ingredient_rows
            .iter()
            .map(row_to_recipe_ingredient)
            .collect::<AppResult<Vec<_>>>()?;

        let kind: String = column(&row, "type")?;
        Ok(Some(Recipe {
            id: column(&row, "id")?,
            name: column(&row, "name")?,
            description: column(&row, "description")?,
            kind: RecipeKind::parse(&kind),
            ingredients,
            created_at: timestamp_column(&row, "created_at")?,
        }))
    }

    // ================================================================================
    // Meals
    // ================================================================================

    /// Create a meal and link its sub recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or a recipe id does not exist
    pub async fn create_meal(&self, request: &NewMeal) -> AppResult<Meal> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO meals (id, name, description, img, main_recipe_id, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.img)
        .bind(&request.main_recipe_id)
        .bind(request.active)
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal: {e}")))?;

        for (position, recipe_id) in request.sub_recipe_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO meal_sub_recipes (meal_id, recipe_id, position) VALUES ($1, $2, $3)",
            )
            .bind(&id)
            .bind(recipe_id)
            .bind(position as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to link sub recipe: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit meal: {e}")))?;

        Ok(Meal {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            img: request.img.clone(),
            main_recipe_id: request.main_recipe_id.clone(),
            active: request.active,
            created_at: now,
        })
    }

    /// List active meals ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_active_meals(&self) -> AppResult<Vec<Meal>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, img, main_recipe_id, active, created_at
            FROM meals
            WHERE active = 1
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list meals: {e}")))?;

        rows.iter().map(row_to_meal).collect()
    }

    /// Get a meal by id, active or not
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_meal(&self, meal_id: &str) -> AppResult<Option<Meal>> {
        let row = sqlx::query(
            r"
            SELECT id, name, description, img, main_recipe_id, active, created_at
            FROM meals
            WHERE id = $1
            ",
        )
        .bind(meal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get meal: {e}")))?;

        row.map(|r| row_to_meal(&r)).transpose()
    }

    /// Get a meal with its main recipe, sub recipes and ingredient table
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or the main recipe is missing
    pub async fn get_meal_with_recipes(&self, meal_id: &str) -> AppResult<Option<MealWithRecipes>> {
        let Some(meal) = self.get_meal(meal_id).await? else {
            return Ok(None);
        };

        let main_recipe = self
            .get_recipe(&meal.main_recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Main recipe").with_resource_id(&meal.main_recipe_id)
            })?;

        let sub_recipe_ids: Vec<String> = sqlx::query_scalar(
            "SELECT recipe_id FROM meal_sub_recipes WHERE meal_id = $1 ORDER BY position ASC",
        )
        .bind(meal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get sub recipes: {e}")))?;

        let mut sub_recipes = Vec::with_capacity(sub_recipe_ids.len());
        for recipe_id in &sub_recipe_ids {
            if let Some(recipe) = self.get_recipe(recipe_id).await? {
                sub_recipes.push(recipe);
            }
        }

        let ingredients = self.ingredients_for_meal(meal_id).await?;

        Ok(Some(MealWithRecipes {
            meal,
            main_recipe,
            sub_recipes,
            ingredients,
        }))
    }

    // ================================================================================
    // Packages
    // ================================================================================

    /// Create a package
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_package(&self, request: &NewPackage) -> AppResult<Package> {
        if request.meals_included == 0 {
            return Err(AppError::out_of_range(
                "A package must include at least one meal",
            ));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO packages (id, name, img, description, meals_included, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.img)
        .bind(&request.description)
        .bind(i64::from(request.meals_included))
        .bind(request.active)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create package: {e}")))?;

        Ok(Package {
            id,
            name: request.name.clone(),
            img: request.img.clone(),
            description: request.description.clone(),
            meals_included: request.meals_included,
            active: request.active,
            created_at: now,
        })
    }

    /// List active packages ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_active_packages(&self) -> AppResult<Vec<Package>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, img, description, meals_included, active, created_at
            FROM packages
            WHERE active = 1
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list packages: {e}")))?;

        rows.iter().map(row_to_package).collect()
    }

    /// Get a package by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_package(&self, package_id: &str) -> AppResult<Option<Package>> {
        let row = sqlx::query(
            r"
            SELECT id, name, img, description, meals_included, active, created_at
            FROM packages
            WHERE id = $1
            ",
        )
        .bind(package_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get package: {e}")))?;

        row.map(|r| row_to_package(&r)).transpose()
    }
}

fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    let ingredient_type: Option<String> = column(row, "type")?;
    let unit: String = column(row, "unit")?;

    Ok(Ingredient {
        id: column(row, "id")?,
        name: column(row, "name")?,
        description: column(row, "description")?,
        ingredient_type: ingredient_type.as_deref().and_then(IngredientType::parse),
        calories: column(row, "calories")?,
        protein: column(row, "protein")?,
        carbs: column(row, "carbs")?,
        fats: column(row, "fats")?,
        unit: IngredientUnit::parse(&unit),
        created_at: timestamp_column(row, "created_at")?,
    })
}

fn row_to_recipe_ingredient(row: &SqliteRow) -> AppResult<RecipeIngredient> {
    let unit: String = column(row, "unit")?;

    Ok(RecipeIngredient {
        ingredient_id: column(row, "ingredient_id")?,
        qty: column(row, "qty")?,
        unit: IngredientUnit::parse(&unit),
    })
}

fn row_to_meal(row: &SqliteRow) -> AppResult<Meal> {
    Ok(Meal {
        id: column(row, "id")?,
        name: column(row, "name")?,
        description: column(row, "description")?,
        img: column(row, "img")?,
        main_recipe_id: column(row, "main_recipe_id")?,
        active: column(row, "active")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

fn row_to_package(row: &SqliteRow) -> AppResult<Package> {
    Ok(Package {
        id: column(row, "id")?,
        name: column(row, "name")?,
        img: column(row, "img")?,
        description: column(row, "description")?,
        meals_included: u32_column(row, "meals_included")?,
        active: column(row, "active")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}
