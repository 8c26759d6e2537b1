// ABOUTME: Conekta API payloads for order creation and webhook events
// ABOUTME: Request bodies are built from PaymentOrderRequest; events are parsed leniently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};

use muscle_meals_core::constants::orders::CURRENCY;

use crate::core::{PaymentLineItem, PaymentMethod, PaymentOrderRequest};

/// Email sent to Conekta for every payer; the storefront does not collect it for payments
pub const PLACEHOLDER_EMAIL: &str = "noreply@musclemealsmx.com";

/// Payer block of an order request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConektaCustomerInfo {
    /// Full name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Phone number
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Hosted checkout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConektaCheckout {
    /// Accepted payment methods
    pub allowed_payment_methods: Vec<&'static str>,
    /// Unix timestamp when the link expires
    pub expires_at: i64,
    /// Checkout flavour
    #[serde(rename = "type")]
    pub checkout_type: &'static str,
    /// Redirect after success
    pub success_url: String,
    /// Redirect after failure
    pub failure_url: String,
}

/// Direct charge with a tokenized card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConektaCharge {
    /// Payment method block
    pub payment_method: ConektaPaymentMethod,
}

/// Tokenized card reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConektaPaymentMethod {
    /// Always `card`
    #[serde(rename = "type")]
    pub method_type: &'static str,
    /// Token issued by Conekta.js
    pub token_id: String,
}

/// Metadata echoed back in webhooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConektaMetadata {
    /// Storefront order id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConektaOrderBody {
    /// Currency of every amount
    pub currency: &'static str,
    /// Payer
    pub customer_info: ConektaCustomerInfo,
    /// Billable lines
    pub line_items: Vec<PaymentLineItem>,
    /// Hosted checkout settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<ConektaCheckout>,
    /// Direct charges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charges: Option<Vec<ConektaCharge>>,
    /// Metadata
    pub metadata: ConektaMetadata,
}

impl From<&PaymentOrderRequest> for ConektaOrderBody {
    fn from(request: &PaymentOrderRequest) -> Self {
        let (checkout, charges) = match &request.method {
            PaymentMethod::HostedCheckout {
                success_url,
                failure_url,
                expires_at,
            } => (
                Some(ConektaCheckout {
                    allowed_payment_methods: vec!["card", "cash"],
                    expires_at: *expires_at,
                    checkout_type: "HostedPayment",
                    success_url: success_url.clone(),
                    failure_url: failure_url.clone(),
                }),
                None,
            ),
            PaymentMethod::CardToken { token_id } => (
                None,
                Some(vec![ConektaCharge {
                    payment_method: ConektaPaymentMethod {
                        method_type: "card",
                        token_id: token_id.clone(),
                    },
                }]),
            ),
        };

        Self {
            currency: CURRENCY,
            customer_info: ConektaCustomerInfo {
                name: request.customer.name.clone(),
                phone: request.customer.phone.clone(),
                email: Some(PLACEHOLDER_EMAIL.to_owned()),
            },
            line_items: request.line_items.clone(),
            checkout,
            charges,
            metadata: ConektaMetadata {
                order_id: Some(request.order_id.clone()),
            },
        }
    }
}

/// Successful `POST /orders` response, reduced to the fields we use
#[derive(Debug, Clone, Deserialize)]
pub struct ConektaOrderResponse {
    /// Conekta order id
    pub id: String,
    /// Hosted checkout block
    #[serde(default)]
    pub checkout: Option<ConektaCheckoutResponse>,
}

/// Hosted checkout block of a response
#[derive(Debug, Clone, Deserialize)]
pub struct ConektaCheckoutResponse {
    /// Payment page URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Error body returned by Conekta
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConektaErrorResponse {
    /// Error details, first one is the most relevant
    #[serde(default)]
    pub details: Vec<ConektaErrorDetail>,
}

/// One error detail
#[derive(Debug, Clone, Deserialize)]
pub struct ConektaErrorDetail {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

impl ConektaErrorResponse {
    /// Message of the first detail, if any
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.details.first().and_then(|d| d.message.as_deref())
    }
}

/// Order object carried by `order.*` webhook events
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ConektaOrderObject {
    /// Conekta order id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Amount in centavos
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: i64,
    /// Currency
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Payer
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_info: ConektaCustomerInfo,
    /// Metadata sent at creation
    #[serde(default)]
    pub metadata: Option<ConektaMetadata>,
    /// Conekta payment status
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl ConektaOrderObject {
    /// Storefront order id from the metadata
    #[must_use]
    pub fn our_order_id(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.order_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Charge object carried by `charge.*` webhook events
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ConektaChargeObject {
    /// Charge id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Conekta order the charge belongs to
    #[serde(default)]
    pub order_id: Option<String>,
    /// Amount in centavos
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: i64,
    /// Charge status
    #[serde(default)]
    pub status: Option<String>,
}

/// Conekta sends `null` for unset fields; treat it like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw webhook envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ConektaWebhookEnvelope {
    /// Event name such as `order.paid`
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event data
    #[serde(default)]
    pub data: Option<ConektaEventData>,
}

/// `data` block of a webhook
#[derive(Debug, Clone, Deserialize)]
pub struct ConektaEventData {
    /// Affected object, shape depends on the event
    #[serde(default)]
    pub object: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PaymentCustomer;

    fn request(method: PaymentMethod) -> PaymentOrderRequest {
        PaymentOrderRequest {
            order_id: "order-1".to_owned(),
            customer: PaymentCustomer {
                name: "Ana".to_owned(),
                phone: "8112345678".to_owned(),
            },
            line_items: vec![PaymentLineItem {
                name: "Pollo teriyaki (FIT)".to_owned(),
                unit_price: 15_500,
                quantity: 2,
            }],
            method,
        }
    }

    #[test]
    fn test_hosted_checkout_body() {
        let body = ConektaOrderBody::from(&request(PaymentMethod::HostedCheckout {
            success_url: "https://shop.test/order-success?our_order_id=order-1".to_owned(),
            failure_url: "https://shop.test/order-failed".to_owned(),
            expires_at: 1_700_086_400,
        }));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["currency"], "MXN");
        assert_eq!(json["customer_info"]["email"], PLACEHOLDER_EMAIL);
        assert_eq!(json["checkout"]["type"], "HostedPayment");
        assert_eq!(json["checkout"]["allowed_payment_methods"][1], "cash");
        assert_eq!(json["metadata"]["order_id"], "order-1");
        assert!(json.get("charges").is_none());
    }

    #[test]
    fn test_card_token_body() {
        let body = ConektaOrderBody::from(&request(PaymentMethod::CardToken {
            token_id: "tok_test".to_owned(),
        }));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["charges"][0]["payment_method"]["type"], "card");
        assert_eq!(json["charges"][0]["payment_method"]["token_id"], "tok_test");
        assert!(json.get("checkout").is_none());
    }

    #[test]
    fn test_error_response_first_message() {
        let error: ConektaErrorResponse =
            serde_json::from_str(r#"{"details":[{"message":"Invalid key"}]}"#).unwrap();
        assert_eq!(error.first_message(), Some("Invalid key"));
        assert_eq!(ConektaErrorResponse::default().first_message(), None);
    }
}
