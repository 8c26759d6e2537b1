// ABOUTME: Main library entry point for the Muscle Meals storefront server
// ABOUTME: Wires configuration, persistence, cart, services and HTTP routes together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Muscle Meals Server
//!
//! Backend for a meal-subscription storefront. Customers browse a menu of
//! a-la-carte meals and build-your-own packages, choose catalog or custom
//! portion sizes, check out with delivery or pickup, pay through a hosted
//! Conekta checkout and receive `WhatsApp` notifications as the payment
//! status changes.
//!
//! ## Architecture
//!
//! - **`muscle-meals-core`**: domain models, errors and constants
//! - **`muscle-meals-calc`**: pure macro, pricing, conversion and zone functions
//! - **`muscle-meals-providers`**: Conekta and `WhatsApp` clients
//! - **this crate**: configuration, `SQLite` managers, cart, services and routes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use muscle_meals_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Muscle Meals configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by binary crates (src/bin/) and integration tests (tests/).

/// Server-side shopping cart
pub mod cart;
/// Environment configuration
pub mod config;
/// Application constants re-exported from the core crate
pub mod constants;
/// `SQLite` persistence for catalog, sizes, customers and orders
pub mod database;
/// Unified error handling re-exported from the core crate
pub mod errors;
/// Production logging and structured output
pub mod logging;
/// `HTTP` middleware for tracing and CORS
pub mod middleware;
/// Domain models re-exported from the core crate
pub mod models;
/// Build-your-own package selection
pub mod package_builder;
/// `HTTP` route groups
pub mod routes;
/// Shared server resources and router assembly
pub mod server;
/// Business services used by the routes
pub mod services;
