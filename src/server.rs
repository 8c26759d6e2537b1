// ABOUTME: Shared server resources, router assembly and the HTTP serve loop
// ABOUTME: Builds payment, messaging and delivery zone handles once and shares them with every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Centralized resource container for dependency injection. Route handlers
//! receive `State<Arc<ServerResources>>` and borrow what they need; the
//! provider clients are trait objects so tests can swap in recording fakes.

use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::middleware::{
    propagate_request_id_layer, request_trace_layer, set_request_id_layer, setup_cors,
};
use crate::routes::{
    CheckoutRoutes, DeliveryRoutes, HealthRoutes, MenuRoutes, OrderRoutes, SizeRoutes,
    WebhookRoutes,
};
use crate::services::OrderNotifier;
use anyhow::{Context, Result};
use axum::Router;
use muscle_meals_calc::ZoneTable;
use muscle_meals_providers::conekta::{ConektaClient, ConektaConfig, WebhookSignatureValidator};
use muscle_meals_providers::whatsapp::{LogOnlyChannel, WhatsAppClient, WhatsAppConfig};
use muscle_meals_providers::{MessagingChannel, PaymentGateway};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// `SQLite` handle
    pub database: Arc<Database>,
    /// Payment gateway used by checkout
    pub payments: Arc<dyn PaymentGateway>,
    /// Channel for customer and owner messages
    pub messaging: Arc<dyn MessagingChannel>,
    /// Delivery service area
    pub zones: Arc<ZoneTable>,
    /// Webhook signature checks
    pub webhook_validator: Arc<WebhookSignatureValidator>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from explicit parts
    #[must_use]
    pub fn new(
        database: Database,
        payments: Arc<dyn PaymentGateway>,
        messaging: Arc<dyn MessagingChannel>,
        config: ServerConfig,
    ) -> Self {
        let zones = ZoneTable::monterrey().with_exclusions(&config.excluded_postal_codes);
        let webhook_validator =
            WebhookSignatureValidator::new(config.conekta.webhook_secret.clone());

        Self {
            database: Arc::new(database),
            payments,
            messaging,
            zones: Arc::new(zones),
            webhook_validator: Arc::new(webhook_validator),
            config: Arc::new(config),
        }
    }

    /// Build the production provider clients from configuration
    ///
    /// Messaging falls back to a log-only channel when `WhatsApp`
    /// credentials are missing.
    #[must_use]
    pub fn from_config(database: Database, config: ServerConfig) -> Self {
        let payments: Arc<dyn PaymentGateway> = Arc::new(ConektaClient::new(ConektaConfig {
            api_url: config.conekta.api_url.clone(),
            private_key: config.conekta.private_key.clone(),
        }));

        let messaging: Arc<dyn MessagingChannel> = match (
            config.whatsapp.phone_id.as_deref(),
            config.whatsapp.access_token.as_deref(),
        ) {
            (Some(phone_id), Some(access_token)) => {
                Arc::new(WhatsAppClient::new(WhatsAppConfig::new(phone_id, access_token)))
            }
            _ => Arc::new(LogOnlyChannel),
        };

        info!(
            payments = payments.name(),
            messaging = messaging.name(),
            "Provider clients initialized"
        );

        Self::new(database, payments, messaging, config)
    }

    /// Notifier bound to the messaging channel and owner phone
    #[must_use]
    pub fn notifier(&self) -> OrderNotifier<'_> {
        OrderNotifier::new(
            self.messaging.as_ref(),
            self.config.whatsapp.owner_phone.as_deref(),
        )
    }
}

/// Full application router with middleware applied
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(MenuRoutes::routes(Arc::clone(&resources)))
        .merge(SizeRoutes::routes(Arc::clone(&resources)))
        .merge(DeliveryRoutes::routes(Arc::clone(&resources)))
        .merge(CheckoutRoutes::routes(Arc::clone(&resources)))
        .merge(OrderRoutes::routes(Arc::clone(&resources)))
        .merge(WebhookRoutes::routes(resources))
        .layer(propagate_request_id_layer())
        .layer(request_trace_layer())
        .layer(cors)
        .layer(set_request_id_layer())
}

/// Serve the API until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP port {port}"))?;

    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
