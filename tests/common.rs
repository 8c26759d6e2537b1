// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides seeded databases, recording provider fakes and request fixtures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `muscle_meals_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use async_trait::async_trait;
use muscle_meals_calc::DeliveryAddress;
use muscle_meals_providers::conekta::WebhookSignatureValidator;
use muscle_meals_providers::{
    MessagingChannel, PaymentGateway, PaymentOrder, PaymentOrderRequest, ProviderError,
    TemplateMessage,
};
use muscle_meals_server::{
    cart::CartItem,
    config::{
        ConektaSettings, Environment, HttpClientSettings, ServerConfig, ShippingConfig,
        WhatsAppSettings,
    },
    database::{seed::seed_demo_catalog, seed::SeededCatalog, Database},
    models::{CustomerInfo, ShippingMethod},
    server::{build_router, ServerResources},
    services::{CheckoutRequest, Fulfillment},
};
use serde_json::json;
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Webhook signing secret used by [`test_config`]
pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Owner phone used by [`test_config`], with country code as deployments set it
pub const OWNER_PHONE: &str = "5218110000000";

/// Public URL used by [`test_config`]
pub const PUBLIC_BASE_URL: &str = "https://tienda.test";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// In-memory database with the demo catalog
pub async fn create_seeded_database() -> Result<(Database, SeededCatalog)> {
    let database = create_test_database().await?;
    let catalog = seed_demo_catalog(&database).await?;
    Ok((database, catalog))
}

/// Configuration with a webhook secret, owner phone and default shipping
pub fn test_config() -> ServerConfig {
    ServerConfig {
        environment: Environment::Testing,
        http_port: 0,
        database_url: "sqlite::memory:".to_owned(),
        public_base_url: PUBLIC_BASE_URL.to_owned(),
        conekta: ConektaSettings {
            api_url: "http://127.0.0.1:9".to_owned(),
            private_key: "key_test".to_owned(),
            webhook_secret: Some(WEBHOOK_SECRET.to_owned()),
        },
        whatsapp: WhatsAppSettings {
            phone_id: None,
            access_token: None,
            owner_phone: Some(OWNER_PHONE.to_owned()),
        },
        shipping: ShippingConfig::default(),
        excluded_postal_codes: vec!["64999".to_owned()],
        http_client: HttpClientSettings::default(),
        cors_allowed_origins: "*".to_owned(),
    }
}

// ============================================================================
// Payment gateway fake
// ============================================================================

/// Payment gateway that records requests instead of calling Conekta
#[derive(Default)]
pub struct RecordingGateway {
    requests: Mutex<Vec<PaymentOrderRequest>>,
    fail: bool,
}

impl RecordingGateway {
    /// Gateway that always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that answers every request with an API error
    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<PaymentOrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn create_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> Result<PaymentOrder, ProviderError> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        if self.fail {
            return Err(ProviderError::ApiError {
                provider: "conekta".to_owned(),
                status_code: 422,
                message: "The card was declined".to_owned(),
                retryable: false,
            });
        }

        Ok(PaymentOrder {
            gateway_order_id: format!("ord_test_{count}"),
            checkout_url: Some(format!("https://pay.conekta.test/checkout/{count}")),
        })
    }
}

// ============================================================================
// Messaging fake
// ============================================================================

/// Message captured by [`RecordingChannel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    /// Free-form text
    Text { to: String, body: String },
    /// Template message
    Template { to: String, template: TemplateMessage },
}

impl SentMessage {
    /// Destination phone
    pub fn to(&self) -> &str {
        match self {
            Self::Text { to, .. } | Self::Template { to, .. } => to,
        }
    }
}

/// Messaging channel that records every message
pub struct RecordingChannel {
    messages: Mutex<Vec<SentMessage>>,
    deliver: bool,
}

impl Default for RecordingChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingChannel {
    /// Channel reporting every message as delivered
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            deliver: true,
        }
    }

    /// Channel reporting every message as failed
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            deliver: false,
        }
    }

    /// Messages sent so far
    pub fn messages(&self) -> Vec<SentMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingChannel for RecordingChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send_text(&self, to: &str, body: &str) -> bool {
        self.messages.lock().unwrap().push(SentMessage::Text {
            to: to.to_owned(),
            body: body.to_owned(),
        });
        self.deliver
    }

    async fn send_template(&self, to: &str, template: &TemplateMessage) -> bool {
        self.messages.lock().unwrap().push(SentMessage::Template {
            to: to.to_owned(),
            template: template.clone(),
        });
        self.deliver
    }
}

// ============================================================================
// Application setup
// ============================================================================

/// Seeded resources wired to recording fakes
pub struct TestApp {
    pub resources: Arc<ServerResources>,
    pub gateway: Arc<RecordingGateway>,
    pub channel: Arc<RecordingChannel>,
    pub catalog: SeededCatalog,
}

impl TestApp {
    /// Full router including middleware
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.resources))
    }

    /// Seeded database
    pub fn database(&self) -> &Database {
        &self.resources.database
    }
}

/// Seeded app with a succeeding gateway
pub async fn create_test_app() -> Result<TestApp> {
    create_test_app_with(RecordingGateway::new()).await
}

/// Seeded app with the given gateway
pub async fn create_test_app_with(gateway: RecordingGateway) -> Result<TestApp> {
    let (database, catalog) = create_seeded_database().await?;
    let gateway = Arc::new(gateway);
    let channel = Arc::new(RecordingChannel::new());

    let resources = Arc::new(ServerResources::new(
        database,
        Arc::clone(&gateway) as Arc<dyn PaymentGateway>,
        Arc::clone(&channel) as Arc<dyn MessagingChannel>,
        test_config(),
    ));

    Ok(TestApp {
        resources,
        gateway,
        channel,
        catalog,
    })
}

// ============================================================================
// Fixtures
// ============================================================================

/// Valid contact data
pub fn customer_info() -> CustomerInfo {
    CustomerInfo {
        name: "Ana López".to_owned(),
        email: "Ana@Example.com".to_owned(),
        phone: "81 2345 6789".to_owned(),
    }
}

/// Complete Monterrey address with the given postal code
pub fn delivery_address(postal_code: &str) -> DeliveryAddress {
    DeliveryAddress {
        street: "Av. Constitución".to_owned(),
        ext_number: "100".to_owned(),
        int_number: Some("4B".to_owned()),
        colonia: "Centro".to_owned(),
        postal_code: postal_code.to_owned(),
        city: "Monterrey".to_owned(),
        state: "Nuevo León".to_owned(),
    }
}

/// Standard delivery to a served postal code
pub fn standard_delivery() -> Fulfillment {
    Fulfillment::Delivery {
        address: delivery_address("64000"),
        shipping_method: ShippingMethod::Standard,
    }
}

/// Individual cart line with a deliberately wrong display price
pub fn individual_item(meal_id: &str, size_id: &str, qty: u32) -> CartItem {
    CartItem::individual(meal_id, "Comida", size_id, "Tamaño", qty, 1)
}

/// Package cart line
pub fn package_item(
    meal_id: &str,
    size_id: &str,
    qty: u32,
    package_id: &str,
    instance_id: &str,
) -> CartItem {
    CartItem {
        package_id: Some(package_id.to_owned()),
        package_name: Some("Paquete".to_owned()),
        package_instance_id: Some(instance_id.to_owned()),
        ..individual_item(meal_id, size_id, qty)
    }
}

/// Checkout request for the given fulfilment and items
pub fn checkout_request(fulfillment: Fulfillment, items: Vec<CartItem>) -> CheckoutRequest {
    CheckoutRequest {
        customer: customer_info(),
        fulfillment,
        items,
    }
}

/// Raw Conekta webhook body for an order event
pub fn order_event_body(event_type: &str, order_id: Option<&str>, phone: &str) -> String {
    let metadata = order_id.map_or_else(|| json!({}), |id| json!({ "order_id": id }));
    json!({
        "type": event_type,
        "data": {
            "object": {
                "id": "ord_2tUigJ8DgBhbp6w5B",
                "amount": 41_000,
                "currency": "MXN",
                "customer_info": { "name": "Ana López", "phone": phone },
                "metadata": metadata,
                "payment_status": "paid"
            }
        }
    })
    .to_string()
}

/// Signature Conekta would send for `body`
pub fn sign_webhook(body: &str) -> String {
    WebhookSignatureValidator::sign(WEBHOOK_SECRET, body.as_bytes())
}
