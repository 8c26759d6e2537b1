// ABOUTME: HTTP tests for the storefront API routes
// ABOUTME: Exercises menu, sizes, delivery, checkout and order endpoints through the full router
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{checkout_request, create_test_app, individual_item, standard_delivery};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_ready() {
    let app = create_test_app().await.unwrap();

    let health = AxumTestRequest::get("/health").send(app.router()).await;
    assert_eq!(health.status(), 200);
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "muscle-meals");

    let ready = AxumTestRequest::get("/ready").send(app.router()).await;
    assert_eq!(ready.status(), 200);
    let body: Value = ready.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/health").send(app.router()).await;
    let request_id = response.header("x-request-id").unwrap();
    assert!(request_id.starts_with("req_"), "{request_id}");

    let echoed = AxumTestRequest::get("/health")
        .header("x-request-id", "req_from_client")
        .send(app.router())
        .await;
    assert_eq!(echoed.header("x-request-id").as_deref(), Some("req_from_client"));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = create_test_app().await.unwrap();

    let response = AxumTestRequest::options("/api/checkout")
        .header("origin", "https://tienda.test")
        .header("access-control-request-method", "POST")
        .send(app.router())
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
}

// ============================================================================
// Menu
// ============================================================================

#[tokio::test]
async fn test_menu_lists_active_meals_only() {
    let app = create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/api/menu").send(app.router()).await;
    assert_eq!(response.status(), 200);

    let meals: Vec<Value> = response.json();
    let names: Vec<&str> = meals.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Pollo chipotle", "Res con camote"]);
    assert!(meals
        .iter()
        .all(|m| m["id"] != app.catalog.retired_meal_id.as_str()));
}

#[tokio::test]
async fn test_meal_detail_has_macros_for_every_catalog_size() {
    let app = create_test_app().await.unwrap();

    let uri = format!("/api/meals/{}", app.catalog.chicken_meal_id);
    let response = AxumTestRequest::get(&uri).send(app.router()).await;
    assert_eq!(response.status(), 200);

    let detail: Value = response.json();
    assert_eq!(detail["name"], "Pollo chipotle");
    let by_size = detail["macros_by_size"].as_array().unwrap();
    let sizes: Vec<&str> = by_size
        .iter()
        .map(|entry| entry["size"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(sizes, vec!["LOW", "FIT", "PLUS"]);
    assert!(by_size[0]["summary"].as_str().unwrap().contains("kcal"));
}

#[tokio::test]
async fn test_retired_meal_is_not_found() {
    let app = create_test_app().await.unwrap();

    let uri = format!("/api/meals/{}", app.catalog.retired_meal_id);
    let response = AxumTestRequest::get(&uri).send(app.router()).await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_meal_macros_need_a_size() {
    let app = create_test_app().await.unwrap();
    let meal_id = &app.catalog.chicken_meal_id;

    let missing = AxumTestRequest::get(&format!("/api/meals/{meal_id}/macros"))
        .send(app.router())
        .await;
    assert_eq!(missing.status(), 400);
    let body: Value = missing.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");

    let uri = format!(
        "/api/meals/{meal_id}/macros?size_id={}",
        app.catalog.fit_size_id
    );
    let found = AxumTestRequest::get(&uri).send(app.router()).await;
    assert_eq!(found.status(), 200);
    let body: Value = found.json();
    assert_eq!(body["size"]["name"], "FIT");
    assert!(body["macros"]["protein"].as_f64().unwrap() > 60.0);
}

#[tokio::test]
async fn test_package_detail_prices_for_size() {
    let app = create_test_app().await.unwrap();

    let list = AxumTestRequest::get("/api/packages").send(app.router()).await;
    assert_eq!(list.status(), 200);
    let packages: Vec<Value> = list.json();
    assert_eq!(packages.len(), 2);

    let uri = format!(
        "/api/packages/{}?size_id={}",
        app.catalog.package_10_id, app.catalog.fit_size_id
    );
    let response = AxumTestRequest::get(&uri).send(app.router()).await;
    assert_eq!(response.status(), 200);

    let detail: Value = response.json();
    assert_eq!(detail["name"], "Paquete 10 comidas");
    assert_eq!(detail["total_price"], 10 * 15_000);

    let unpriced = AxumTestRequest::get(&format!("/api/packages/{}", app.catalog.package_5_id))
        .send(app.router())
        .await;
    let detail: Value = unpriced.json();
    assert!(detail["total_price"].is_null());
}

#[tokio::test]
async fn test_pickup_spots_list_active_only() {
    let app = create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/api/pickup-spots")
        .send(app.router())
        .await;
    assert_eq!(response.status(), 200);

    let spots: Vec<Value> = response.json();
    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0]["name"], "Muscle Meals Cumbres");
}

// ============================================================================
// Delivery
// ============================================================================

#[tokio::test]
async fn test_postal_code_check() {
    let app = create_test_app().await.unwrap();

    let served: Value = AxumTestRequest::get("/api/delivery/postal-codes/64000")
        .send(app.router())
        .await
        .json();
    assert_eq!(served["valid"], true);
    assert_eq!(served["zone"], "Monterrey");

    let excluded: Value = AxumTestRequest::get("/api/delivery/postal-codes/64999")
        .send(app.router())
        .await
        .json();
    assert_eq!(excluded["valid"], false);
    assert_eq!(excluded["zone"], "Monterrey");

    let malformed = AxumTestRequest::get("/api/delivery/postal-codes/abc")
        .send(app.router())
        .await;
    assert_eq!(malformed.status(), 200);
    let malformed: Value = malformed.json();
    assert_eq!(malformed["valid"], false);
    assert!(malformed["zone"].is_null());
}

// ============================================================================
// Sizes
// ============================================================================

#[tokio::test]
async fn test_size_list_and_lookup() {
    let app = create_test_app().await.unwrap();

    let sizes: Vec<Value> = AxumTestRequest::get("/api/sizes")
        .send(app.router())
        .await
        .json();
    assert_eq!(sizes.len(), 3);
    assert_eq!(sizes[1]["name"], "FIT");
    assert_eq!(sizes[1]["price"], 15_500);

    let uri = format!("/api/sizes/{}", app.catalog.plus_size_id);
    let plus: Value = AxumTestRequest::get(&uri).send(app.router()).await.json();
    assert_eq!(plus["protein_qty"], 220);

    let missing = AxumTestRequest::get("/api/sizes/nope")
        .send(app.router())
        .await;
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_size_quote() {
    let app = create_test_app().await.unwrap();

    let response = AxumTestRequest::post("/api/sizes/quote")
        .json(&json!({ "protein_qty": 178, "carb_qty": 54, "veg_qty": 300 }))
        .send(app.router())
        .await;
    assert_eq!(response.status(), 200);

    let quote: Value = response.json();
    assert_eq!(quote["portion"]["protein_qty"], 180);
    assert_eq!(quote["portion"]["veg_qty"], 150);
    assert_eq!(quote["price"], 16_500);
    assert_eq!(quote["package_price"], 16_000);
}

#[tokio::test]
async fn test_custom_size_created_then_conflicts() {
    let app = create_test_app().await.unwrap();
    let body = json!({ "name": "Volumen", "protein_qty": 220, "carb_qty": 80, "veg_qty": 120 });

    let created = AxumTestRequest::post("/api/sizes/custom")
        .json(&body)
        .send(app.router())
        .await;
    assert_eq!(created.status(), 201);
    let size: Value = created.json();
    assert_eq!(size["name"], "Volumen");
    assert_eq!(size["is_main"], false);

    let duplicate = AxumTestRequest::post("/api/sizes/custom")
        .json(&body)
        .send(app.router())
        .await;
    assert_eq!(duplicate.status(), 409);
    let error: Value = duplicate.json();
    assert_eq!(error["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

// ============================================================================
// Checkout and orders
// ============================================================================

#[tokio::test]
async fn test_checkout_then_fetch_order() {
    let app = create_test_app().await.unwrap();
    let request = checkout_request(
        standard_delivery(),
        vec![individual_item(
            &app.catalog.chicken_meal_id,
            &app.catalog.fit_size_id,
            2,
        )],
    );

    let response = AxumTestRequest::post("/api/checkout")
        .json(&request)
        .send(app.router())
        .await;
    assert_eq!(response.status(), 201);

    let placed: Value = response.json();
    assert_eq!(placed["order_number"], "MM-0001");
    assert_eq!(placed["total_amount"], 36_000);
    assert!(placed["checkout_url"].as_str().unwrap().starts_with("https://"));

    let order_id = placed["order_id"].as_str().unwrap();
    let order: Value = AxumTestRequest::get(&format!("/api/orders/{order_id}"))
        .send(app.router())
        .await
        .json();
    assert_eq!(order["status"], "pending");
    assert_eq!(order["shipping_method"], "standard");
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    assert_eq!(order["customer"]["email"], "ana@example.com");
}

#[tokio::test]
async fn test_checkout_validation_error_shape() {
    let app = create_test_app().await.unwrap();
    let request = checkout_request(standard_delivery(), Vec::new());

    let response = AxumTestRequest::post("/api/checkout")
        .json(&request)
        .send(app.router())
        .await;

    assert_eq!(response.status(), 400);
    let error: Value = response.json();
    assert_eq!(error["error"]["code"], "INVALID_INPUT");
    assert_eq!(error["error"]["message"], "Cart is empty");
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let app = create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/api/orders/does-not-exist")
        .send(app.router())
        .await;

    assert_eq!(response.status(), 404);
    let error: Value = response.json();
    assert_eq!(error["error"]["code"], "RESOURCE_NOT_FOUND");
    assert_eq!(error["error"]["resource_id"], "does-not-exist");
}
