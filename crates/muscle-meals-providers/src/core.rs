// ABOUTME: Provider traits for payment gateways and messaging channels
// ABOUTME: Request and response types shared by every implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Provider seams.
//!
//! The server talks to payments and messaging only through these traits so
//! tests can swap in recording fakes and a missing WhatsApp configuration
//! can fall back to [`crate::whatsapp::LogOnlyChannel`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;

/// One billable line of a payment order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLineItem {
    /// Label shown on the checkout page
    pub name: String,
    /// Unit price in centavos
    pub unit_price: i64,
    /// Quantity
    pub quantity: u32,
}

/// Payer contact data sent to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCustomer {
    /// Full name
    pub name: String,
    /// Phone number
    pub phone: String,
}

/// How the payer completes the payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Gateway-hosted page accepting card and cash
    HostedCheckout {
        /// Redirect after a successful payment
        success_url: String,
        /// Redirect after a failed payment
        failure_url: String,
        /// Unix timestamp when the link stops working
        expires_at: i64,
    },
    /// Card tokenized by the browser, charged immediately
    CardToken {
        /// Token id issued by the gateway's JS library
        token_id: String,
    },
}

/// Payment order to create for one storefront order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrderRequest {
    /// Storefront order id, echoed back in webhook metadata
    pub order_id: String,
    /// Payer
    pub customer: PaymentCustomer,
    /// Billable lines including shipping
    pub line_items: Vec<PaymentLineItem>,
    /// Payment flow
    pub method: PaymentMethod,
}

impl PaymentOrderRequest {
    /// Sum of all lines in centavos
    #[must_use]
    pub fn total(&self) -> i64 {
        self.line_items
            .iter()
            .map(|item| item.unit_price * i64::from(item.quantity))
            .sum()
    }
}

/// Payment order created by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    /// Gateway order id
    pub gateway_order_id: String,
    /// Hosted checkout URL, absent for direct card charges
    pub checkout_url: Option<String>,
}

/// Payment processor able to create orders
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Provider name used in logs and errors
    fn name(&self) -> &'static str;

    /// Create a payment order
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the request fails or the gateway rejects it
    async fn create_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> Result<PaymentOrder, ProviderError>;
}

/// Pre-approved message template with a header and positional body values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMessage {
    /// Template name registered with the messaging provider
    pub name: String,
    /// Template language code
    pub language: String,
    /// Header text parameter
    pub header: Option<String>,
    /// Body text parameters in order
    pub body: Vec<String>,
}

/// Outbound messaging channel
///
/// Sending never fails the caller: implementations log problems and
/// report delivery as a boolean.
#[async_trait]
pub trait MessagingChannel: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &'static str;

    /// Send a free-form text message
    async fn send_text(&self, to: &str, body: &str) -> bool;

    /// Send a pre-approved template message
    async fn send_template(&self, to: &str, template: &TemplateMessage) -> bool;
}
