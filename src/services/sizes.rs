// ABOUTME: Custom portion size quoting and creation
// ABOUTME: Normalizes requested grams, prices them and persists named custom sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::portions::MAX_SIZE_NAME_CHARS;
use crate::database::{Database, NewSize};
use crate::errors::{AppError, AppResult};
use crate::models::{IngredientType, PortionGrams, Size};
use muscle_meals_calc::{calculate_custom_size_price, CookedPortion, PortionLimits};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Whether requested grams are raw or cooked weights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GramBasis {
    /// Raw weights, as stored
    #[default]
    Raw,
    /// Cooked weights, converted back to raw
    Cooked,
}

/// Requested portion grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortionRequest {
    /// Protein grams
    pub protein_qty: f64,
    /// Carbohydrate grams
    pub carb_qty: f64,
    /// Vegetable grams
    pub veg_qty: f64,
    /// Raw or cooked weights
    #[serde(default)]
    pub basis: GramBasis,
}

impl PortionRequest {
    /// Raw portion stepped to 5 g and clamped to `limits`
    #[must_use]
    pub fn normalize(&self, limits: &PortionLimits) -> PortionGrams {
        match self.basis {
            GramBasis::Raw => limits.normalize(self.protein_qty, self.carb_qty, self.veg_qty),
            GramBasis::Cooked => PortionGrams::new(
                limits.from_cooked(whole_grams(self.protein_qty), IngredientType::Protein),
                limits.from_cooked(whole_grams(self.carb_qty), IngredientType::Carb),
                limits.from_cooked(whole_grams(self.veg_qty), IngredientType::Vegetable),
            ),
        }
    }
}

/// Named custom size to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSizeRequest {
    /// Display name, unique among custom sizes without owner
    #[serde(default)]
    pub name: String,
    /// Requested grams
    #[serde(flatten)]
    pub portion: PortionRequest,
}

/// Price preview of a portion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeQuote {
    /// Stored raw grams
    pub portion: PortionGrams,
    /// Cooked grams shown to the shopper
    pub cooked: CookedPortion,
    /// Single meal price in centavos
    pub price: i64,
    /// Per-meal package price in centavos
    pub package_price: i64,
}

/// Price a portion without saving it
#[must_use]
pub fn quote(request: &PortionRequest) -> SizeQuote {
    let portion = request.normalize(&PortionLimits::default());
    let price = calculate_custom_size_price(&portion);

    SizeQuote {
        portion,
        cooked: CookedPortion::from_raw(&portion),
        price: price.price,
        package_price: price.package_price,
    }
}

/// Create a custom size
///
/// # Errors
///
/// Returns `MissingRequiredField` for a blank name, `InvalidInput` for a
/// name longer than 50 characters, `ResourceAlreadyExists` when the name is
/// taken, or a database error
pub async fn create_custom_size(
    database: &Database,
    request: &CustomSizeRequest,
) -> AppResult<Size> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::missing_field("name"));
    }
    if name.chars().count() > MAX_SIZE_NAME_CHARS {
        return Err(AppError::invalid_input(format!(
            "Size name must be at most {MAX_SIZE_NAME_CHARS} characters"
        )));
    }

    let quote = quote(&request.portion);
    let size = database
        .sizes()
        .create_size(&NewSize {
            name: name.to_owned(),
            is_main: false,
            customer_id: None,
            portion: quote.portion,
            price: quote.price,
            package_price: quote.package_price,
        })
        .await?;

    info!(
        size_id = %size.id,
        protein = size.protein_qty,
        carb = size.carb_qty,
        veg = size.veg_qty,
        price = size.price,
        "Custom size created"
    );

    Ok(size)
}

fn whole_grams(grams: f64) -> u32 {
    if grams.is_finite() && grams > 0.0 {
        grams.round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(protein: f64, carb: f64, veg: f64) -> PortionRequest {
        PortionRequest {
            protein_qty: protein,
            carb_qty: carb,
            veg_qty: veg,
            basis: GramBasis::Raw,
        }
    }

    #[test]
    fn test_quote_normalizes_before_pricing() {
        let quote = quote(&raw(178.0, 54.0, 300.0));

        assert_eq!(quote.portion, PortionGrams::new(180, 55, 150));
        // protein 180 base, carb band 55 no delta, veg 150 top band
        assert_eq!(quote.price, 16_500);
        assert_eq!(quote.package_price, quote.price - 500);
    }

    #[test]
    fn test_cooked_basis_converts_to_raw() {
        let request = PortionRequest {
            basis: GramBasis::Cooked,
            ..raw(146.0, 121.0, 70.0)
        };

        // 146 / 0.81 = 180.2, 121 / 2.2 = 55
        assert_eq!(
            request.normalize(&PortionLimits::default()),
            PortionGrams::new(180, 55, 70)
        );
    }

    #[test]
    fn test_negative_and_nan_grams_become_zero() {
        let quote = quote(&raw(-10.0, f64::NAN, 0.0));
        assert_eq!(quote.portion, PortionGrams::new(0, 0, 0));
    }

    #[test]
    fn test_request_deserializes_flat() {
        let request: CustomSizeRequest = serde_json::from_str(
            r#"{"name":"Volumen","protein_qty":220,"carb_qty":80,"veg_qty":120}"#,
        )
        .unwrap();

        assert_eq!(request.name, "Volumen");
        assert_eq!(request.portion.basis, GramBasis::Raw);
    }
}
