// ABOUTME: Meal macro calculation from the recipe graph and a portion size
// ABOUTME: Typed main-recipe ingredients scale with the size, sub recipes never do
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use muscle_meals_core::models::{Ingredient, Macros, PortionGrams, Recipe};
use tracing::debug;

/// Ingredient table keyed by ingredient id
pub type IngredientLookup = HashMap<String, Ingredient>;

/// Build a lookup table from loaded ingredients
#[must_use]
pub fn index_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> IngredientLookup {
    ingredients
        .into_iter()
        .map(|ingredient| (ingredient.id.clone(), ingredient))
        .collect()
}

/// Compute calories and macros for one serving of a meal
///
/// Ingredients of the main recipe that carry a type use the matching gram
/// target of `portion`; untyped ones use the authored quantity. Sub recipe
/// quantities are always used as authored. Ids missing from `ingredients`
/// are skipped. Totals are rounded to one decimal.
#[must_use]
pub fn calculate_meal_macros(
    main_recipe: &Recipe,
    sub_recipes: &[Recipe],
    ingredients: &IngredientLookup,
    portion: &PortionGrams,
) -> Macros {
    let mut totals = Macros::zero();

    for line in &main_recipe.ingredients {
        let Some(ingredient) = ingredients.get(&line.ingredient_id) else {
            debug!(
                recipe.id = %main_recipe.id,
                ingredient.id = %line.ingredient_id,
                "Unknown ingredient skipped"
            );
            continue;
        };
        let qty = ingredient
            .ingredient_type
            .map_or(line.qty, |ingredient_type| {
                f64::from(portion.for_type(ingredient_type))
            });
        accumulate(&mut totals, ingredient, qty);
    }

    for recipe in sub_recipes {
        for line in &recipe.ingredients {
            match ingredients.get(&line.ingredient_id) {
                Some(ingredient) => accumulate(&mut totals, ingredient, line.qty),
                None => debug!(
                    recipe.id = %recipe.id,
                    ingredient.id = %line.ingredient_id,
                    "Unknown ingredient skipped"
                ),
            }
        }
    }

    Macros {
        calories: round_one_decimal(totals.calories),
        protein: round_one_decimal(totals.protein),
        carbs: round_one_decimal(totals.carbs),
        fats: round_one_decimal(totals.fats),
    }
}

fn accumulate(totals: &mut Macros, ingredient: &Ingredient, qty: f64) {
    let factor = qty / 100.0;
    totals.calories += ingredient.calories * factor;
    totals.protein += ingredient.protein * factor;
    totals.carbs += ingredient.carbs * factor;
    totals.fats += ingredient.fats * factor;
}

/// Round half away from zero to one decimal place
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Render macros as a single summary line with whole numbers
#[must_use]
pub fn format_macros(macros: &Macros) -> String {
    format!(
        "{} kcal · {}g pro · {}g carb · {}g fat",
        macros.calories.round() as i64,
        macros.protein.round() as i64,
        macros.carbs.round() as i64,
        macros.fats.round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use muscle_meals_core::models::{IngredientType, IngredientUnit, RecipeIngredient, RecipeKind};

    fn ingredient(
        id: &str,
        ingredient_type: Option<IngredientType>,
        per_100: [f64; 4],
    ) -> Ingredient {
        Ingredient {
            id: id.to_owned(),
            name: id.to_owned(),
            description: None,
            ingredient_type,
            calories: per_100[0],
            protein: per_100[1],
            carbs: per_100[2],
            fats: per_100[3],
            unit: IngredientUnit::Grams,
            created_at: Utc::now(),
        }
    }

    fn recipe(kind: RecipeKind, lines: &[(&str, f64)]) -> Recipe {
        Recipe {
            id: format!("{kind:?}"),
            name: "recipe".to_owned(),
            description: None,
            kind,
            ingredients: lines
                .iter()
                .map(|(id, qty)| RecipeIngredient::grams(*id, *qty))
                .collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_protein_quantity_comes_from_size() {
        let lookup = index_ingredients([ingredient(
            "chicken",
            Some(IngredientType::Protein),
            [165.0, 31.0, 0.0, 3.6],
        )]);
        let main = recipe(RecipeKind::Main, &[("chicken", 200.0)]);

        let macros = calculate_meal_macros(&main, &[], &lookup, &PortionGrams::new(180, 55, 70));

        assert!((macros.calories - 297.0).abs() < f64::EPSILON);
        assert!((macros.protein - 55.8).abs() < 1e-9);
        assert!((macros.carbs - 0.0).abs() < f64::EPSILON);
        assert!((macros.fats - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_sub_recipe_never_scales() {
        let lookup = index_ingredients([ingredient(
            "chicken",
            Some(IngredientType::Protein),
            [165.0, 31.0, 0.0, 3.6],
        )]);
        let main = recipe(RecipeKind::Main, &[]);
        let sauce = recipe(RecipeKind::Sub, &[("chicken", 100.0)]);

        let subs = [sauce];

        let small = calculate_meal_macros(&main, &subs, &lookup, &PortionGrams::new(160, 0, 0));
        let large = calculate_meal_macros(&main, &subs, &lookup, &PortionGrams::new(250, 0, 0));

        assert_eq!(small, large);
        assert!((small.calories - 165.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_ingredients_are_skipped() {
        let lookup = IngredientLookup::new();
        let main = recipe(RecipeKind::Main, &[("ghost", 100.0)]);

        let macros = calculate_meal_macros(&main, &[], &lookup, &PortionGrams::new(180, 55, 70));

        assert_eq!(macros, Macros::zero());
    }

    #[test]
    fn test_format_macros_rounds_to_integers() {
        let macros = Macros {
            calories: 412.6,
            protein: 55.8,
            carbs: 40.2,
            fats: 9.5,
        };
        assert_eq!(
            format_macros(&macros),
            "413 kcal · 56g pro · 40g carb · 10g fat"
        );
    }
}
