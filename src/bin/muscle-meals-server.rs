// ABOUTME: Storefront API server binary
// ABOUTME: Loads configuration, prepares the database and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![recursion_limit = "256"]

//! # Muscle Meals API Server Binary
//!
//! Starts the storefront API: menu, custom sizes, checkout with Conekta and
//! `WhatsApp` order notifications.

use anyhow::Result;
use clap::Parser;
use muscle_meals_providers::initialize_shared_client;
use muscle_meals_server::{
    config::environment::ServerConfig,
    database::Database,
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "muscle-meals-server")]
#[command(about = "Muscle Meals API - meal subscriptions, custom portions and checkout")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Muscle Meals API");
    info!("{}", config.summary());

    initialize_shared_client(
        config.http_client.timeout_secs,
        config.http_client.connect_timeout_secs,
    );

    let database = Database::new(&config.database_url).await?;
    info!("Database ready: {}", config.database_url);

    let port = config.http_port;
    display_available_endpoints(port);

    let resources = Arc::new(ServerResources::from_config(database, config));

    if let Err(e) = server::run(resources, port).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    info!("   Health:            GET  http://{host}:{port}/health");
    info!("   Menu:              GET  http://{host}:{port}/api/menu");
    info!("   Meal Detail:       GET  http://{host}:{port}/api/meals/{{id}}");
    info!("   Meal Macros:       GET  http://{host}:{port}/api/meals/{{id}}/macros?size_id=");
    info!("   Packages:          GET  http://{host}:{port}/api/packages");
    info!("   Sizes:             GET  http://{host}:{port}/api/sizes");
    info!("   Size Quote:        POST http://{host}:{port}/api/sizes/quote");
    info!("   Custom Size:       POST http://{host}:{port}/api/sizes/custom");
    info!("   Postal Codes:      GET  http://{host}:{port}/api/delivery/postal-codes/{{cp}}");
    info!("   Pickup Spots:      GET  http://{host}:{port}/api/pickup-spots");
    info!("   Checkout:          POST http://{host}:{port}/api/checkout");
    info!("   Order:             GET  http://{host}:{port}/api/orders/{{id}}");
    info!("   Conekta Webhook:   POST http://{host}:{port}/api/webhooks/conekta");
    info!("=== End of Endpoint List ===");
}
