// ABOUTME: Conekta payment gateway integration
// ABOUTME: Order creation client, request/response models, and webhook handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// REST client implementing `PaymentGateway`
pub mod client;
/// Request, response, and webhook payloads
pub mod models;
/// Webhook signature validation and event parsing
pub mod webhook;

pub use client::{ConektaClient, ConektaConfig};
pub use models::{ConektaChargeObject, ConektaCustomerInfo, ConektaOrderObject};
pub use webhook::{ConektaEvent, SignatureValidation, WebhookSignatureValidator, SIGNATURE_HEADER};
