// ABOUTME: Integration tests for custom portion sizes
// ABOUTME: Covers normalization, pricing, name validation and duplicate names against SQLite
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use muscle_meals_server::errors::ErrorCode;
use muscle_meals_server::services::sizes::{create_custom_size, quote};
use muscle_meals_server::services::{CustomSizeRequest, GramBasis, PortionRequest};

fn request(name: &str, protein: f64, carb: f64, veg: f64) -> CustomSizeRequest {
    CustomSizeRequest {
        name: name.to_owned(),
        portion: PortionRequest {
            protein_qty: protein,
            carb_qty: carb,
            veg_qty: veg,
            basis: GramBasis::Raw,
        },
    }
}

#[tokio::test]
async fn test_create_custom_size_normalizes_and_prices() {
    let (database, _) = common::create_seeded_database().await.unwrap();

    let size = create_custom_size(&database, &request("  Volumen  ", 233.0, 81.0, 400.0))
        .await
        .unwrap();

    assert_eq!(size.name, "Volumen");
    assert!(!size.is_main);
    assert!(size.customer_id.is_none());
    // 233 steps to 235, carb 80, veg clamps to 150
    assert_eq!(
        (size.protein_qty, size.carb_qty, size.veg_qty),
        (235, 80, 150)
    );
    assert_eq!(size.price, 18_500 + 1_000 + 1_000);
    assert_eq!(size.package_price, size.price - 500);

    let stored = database.sizes().get_size(&size.id).await.unwrap().unwrap();
    assert_eq!(stored.price, size.price);
}

#[tokio::test]
async fn test_custom_sizes_stay_out_of_catalog_list() {
    let (database, _) = common::create_seeded_database().await.unwrap();

    create_custom_size(&database, &request("Corte", 160.0, 20.0, 40.0))
        .await
        .unwrap();

    let names: Vec<String> = database
        .sizes()
        .list_main_sizes()
        .await
        .unwrap()
        .into_iter()
        .map(|size| size.name)
        .collect();
    assert_eq!(names, vec!["LOW", "FIT", "PLUS"]);
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let (database, _) = common::create_seeded_database().await.unwrap();

    create_custom_size(&database, &request("Mi tamaño", 180.0, 55.0, 70.0))
        .await
        .unwrap();
    let err = create_custom_size(&database, &request("Mi tamaño", 200.0, 60.0, 80.0))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(
        err.message,
        "A size named \"Mi tamaño\" already exists. Use another name."
    );
}

#[tokio::test]
async fn test_catalog_names_are_taken() {
    let (database, _) = common::create_seeded_database().await.unwrap();

    let err = create_custom_size(&database, &request("FIT", 180.0, 55.0, 70.0))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_blank_and_long_names_are_rejected() {
    let (database, _) = common::create_seeded_database().await.unwrap();

    let blank = create_custom_size(&database, &request("   ", 180.0, 55.0, 70.0))
        .await
        .unwrap_err();
    assert_eq!(blank.code, ErrorCode::MissingRequiredField);

    let long = create_custom_size(&database, &request(&"x".repeat(51), 180.0, 55.0, 70.0))
        .await
        .unwrap_err();
    assert_eq!(long.code, ErrorCode::InvalidInput);

    let exact = create_custom_size(&database, &request(&"ñ".repeat(50), 180.0, 55.0, 70.0)).await;
    assert!(exact.is_ok());
}

#[test]
fn test_quote_reports_cooked_equivalents() {
    let quote = quote(&PortionRequest {
        protein_qty: 180.0,
        carb_qty: 55.0,
        veg_qty: 70.0,
        basis: GramBasis::Raw,
    });

    assert_eq!(quote.price, 15_500);
    assert_eq!(quote.package_price, 15_000);
    assert_eq!(
        (quote.cooked.protein, quote.cooked.carb, quote.cooked.veg),
        (146, 121, 70)
    );
}
