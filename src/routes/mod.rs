// ABOUTME: Route module organization for the Muscle Meals HTTP API
// ABOUTME: Groups thin handlers by domain; each delegates to the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Muscle Meals server
//!
//! Each domain module exposes a unit struct with a `routes()` constructor
//! returning an axum `Router` already bound to the shared resources.

/// Checkout routes
pub mod checkout;
/// Delivery area lookups
pub mod delivery;
/// Health check and readiness routes
pub mod health;
/// Menu, meal, package and pickup spot routes
pub mod menu;
/// Order lookup routes
pub mod orders;
/// Catalog and custom size routes
pub mod sizes;
/// Payment gateway webhook routes
pub mod webhooks;

pub use checkout::CheckoutRoutes;
pub use delivery::{DeliveryRoutes, PostalCodeCheck};
pub use health::HealthRoutes;
pub use menu::MenuRoutes;
pub use orders::OrderRoutes;
pub use sizes::SizeRoutes;
pub use webhooks::WebhookRoutes;
