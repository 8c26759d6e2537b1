// ABOUTME: Payment and messaging provider integrations for the storefront
// ABOUTME: Conekta orders and webhooks, WhatsApp Cloud API messages, shared HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! Provider clients for the Muscle Meals storefront.
//!
//! - **conekta**: hosted checkout and card orders, webhook signatures and events
//! - **whatsapp**: text and template messages, order message builders
//! - **core**: the `PaymentGateway` and `MessagingChannel` traits

/// Conekta payment gateway
pub mod conekta;
/// Provider traits and shared request types
pub mod core;
/// Provider error type
pub mod errors;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// WhatsApp Cloud API messaging
pub mod whatsapp;

pub use crate::core::{
    MessagingChannel, PaymentCustomer, PaymentGateway, PaymentLineItem, PaymentMethod,
    PaymentOrder, PaymentOrderRequest, TemplateMessage,
};
pub use errors::ProviderError;
pub use http_client::{initialize_shared_client, shared_client};
