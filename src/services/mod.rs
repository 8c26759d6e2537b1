// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Menu reads, custom sizes, checkout, payment webhooks and order notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they extract the request, call into a service
//! and serialize the result. Services take the database and provider
//! handles they need as arguments so tests can drive them without a router.

/// Checkout from cart to hosted payment link
pub mod checkout;

/// Menu, size, package and pickup spot reads
pub mod menu;

/// WhatsApp messages for order events
pub mod notifications;

/// Custom size quotes and creation
pub mod sizes;

/// Payment gateway webhook events
pub mod webhook;

pub use checkout::{CheckoutRequest, CheckoutResponse, CheckoutService, Fulfillment};
pub use notifications::{OrderNotifier, Recipient};
pub use sizes::{CustomSizeRequest, GramBasis, PortionRequest, SizeQuote};
pub use webhook::WebhookService;
