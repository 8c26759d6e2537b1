// ABOUTME: Conekta webhook signature validation and event parsing
// ABOUTME: HMAC-SHA256 over the raw body compared in constant time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Conekta webhooks
//!
//! Requests may carry an `x-conekta-signature` header holding the hex
//! encoded HMAC-SHA256 of the raw body. A present signature must match;
//! requests without the header are accepted.
//!
//! ## Event Types
//!
//! - `order.paid`, `order.pending_payment`, `order.expired` carry an order
//! - `charge.paid`, `charge.refunded`, `charge.chargeback` carry a charge

use ring::hmac;
use tracing::warn;

use super::models::{ConektaChargeObject, ConektaOrderObject, ConektaWebhookEnvelope};
use crate::errors::ProviderError;

/// Header carrying the signature
pub const SIGNATURE_HEADER: &str = "x-conekta-signature";

/// Webhook signature validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureValidation {
    /// Signature is valid
    Valid,
    /// Signature is invalid
    Invalid,
    /// Signature header is missing
    Missing,
    /// Header present but no signing secret configured
    NotConfigured,
}

impl SignatureValidation {
    /// Whether the request may be processed
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Valid | Self::Missing)
    }
}

/// Validates Conekta webhook signatures
pub struct WebhookSignatureValidator {
    signing_secret: Option<String>,
}

impl WebhookSignatureValidator {
    /// Create a validator; `None` or an empty secret rejects every signed request
    #[must_use]
    pub fn new(signing_secret: Option<String>) -> Self {
        Self {
            signing_secret: signing_secret.filter(|s| !s.is_empty()),
        }
    }

    /// Hex encoded HMAC-SHA256 of `body`
    #[must_use]
    pub fn sign(secret: &str, body: &[u8]) -> String {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
        hex::encode(hmac::sign(&key, body).as_ref())
    }

    /// Validate a webhook request signature
    #[must_use]
    pub fn validate(&self, signature_header: Option<&str>, body: &[u8]) -> SignatureValidation {
        let Some(signature) = signature_header else {
            return SignatureValidation::Missing;
        };

        let Some(secret) = self.signing_secret.as_deref() else {
            warn!("Conekta webhook is signed but no webhook secret is configured");
            return SignatureValidation::NotConfigured;
        };

        let expected = Self::sign(secret, body);

        if subtle::ConstantTimeEq::ct_eq(signature.trim().as_bytes(), expected.as_bytes()).into() {
            SignatureValidation::Valid
        } else {
            SignatureValidation::Invalid
        }
    }
}

/// Parsed Conekta webhook event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConektaEvent {
    /// Order fully paid
    OrderPaid(ConektaOrderObject),
    /// Cash order waiting for payment
    OrderPendingPayment(ConektaOrderObject),
    /// Payment link expired
    OrderExpired(ConektaOrderObject),
    /// Single charge paid
    ChargePaid(ConektaChargeObject),
    /// Charge refunded
    ChargeRefunded(ConektaChargeObject),
    /// Charge disputed by the card holder
    ChargeChargeback(ConektaChargeObject),
    /// Any other event name
    Other(String),
}

impl ConektaEvent {
    /// Parse a raw webhook body
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ParseError` when the body is not a JSON event
    /// or the object does not match the event type.
    pub fn parse(body: &[u8]) -> Result<Self, ProviderError> {
        let envelope: ConektaWebhookEnvelope =
            serde_json::from_slice(body).map_err(|e| parse_error("webhook_event", e))?;
        let object = envelope.data.map(|d| d.object).unwrap_or_default();

        let event = match envelope.event_type.as_str() {
            "order.paid" => Self::OrderPaid(order_object(object)?),
            "order.pending_payment" => Self::OrderPendingPayment(order_object(object)?),
            "order.expired" => Self::OrderExpired(order_object(object)?),
            "charge.paid" => Self::ChargePaid(charge_object(object)?),
            "charge.refunded" => Self::ChargeRefunded(charge_object(object)?),
            "charge.chargeback" => Self::ChargeChargeback(charge_object(object)?),
            _ => Self::Other(envelope.event_type),
        };
        Ok(event)
    }

    /// Order object of `order.*` events
    #[must_use]
    pub const fn order(&self) -> Option<&ConektaOrderObject> {
        match self {
            Self::OrderPaid(order) | Self::OrderPendingPayment(order) | Self::OrderExpired(order) => {
                Some(order)
            }
            _ => None,
        }
    }

    /// Event name as sent by Conekta
    #[must_use]
    pub fn event_type(&self) -> &str {
        match self {
            Self::OrderPaid(_) => "order.paid",
            Self::OrderPendingPayment(_) => "order.pending_payment",
            Self::OrderExpired(_) => "order.expired",
            Self::ChargePaid(_) => "charge.paid",
            Self::ChargeRefunded(_) => "charge.refunded",
            Self::ChargeChargeback(_) => "charge.chargeback",
            Self::Other(name) => name,
        }
    }
}

fn parse_error(field: &'static str, source: serde_json::Error) -> ProviderError {
    ProviderError::ParseError {
        provider: "conekta".to_owned(),
        field,
        source,
    }
}

fn order_object(value: serde_json::Value) -> Result<ConektaOrderObject, ProviderError> {
    if value.is_null() {
        return Ok(ConektaOrderObject::default());
    }
    serde_json::from_value(value).map_err(|e| parse_error("order_object", e))
}

fn charge_object(value: serde_json::Value) -> Result<ConektaChargeObject, ProviderError> {
    if value.is_null() {
        return Ok(ConektaChargeObject::default());
    }
    serde_json::from_value(value).map_err(|e| parse_error("charge_object", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conekta::models::ConektaCustomerInfo;

    const BODY: &[u8] = br#"{"type":"order.paid","data":{"object":{"id":"ord_1","amount":31000,"currency":"MXN","customer_info":{"name":"Ana","phone":"8112345678"},"metadata":{"order_id":"abc-123"}}}}"#;

    #[test]
    fn test_signature_validation() {
        let validator = WebhookSignatureValidator::new(Some("whsec".to_owned()));
        let good = WebhookSignatureValidator::sign("whsec", BODY);

        assert_eq!(validator.validate(Some(&good), BODY), SignatureValidation::Valid);
        assert_eq!(
            validator.validate(Some("deadbeef"), BODY),
            SignatureValidation::Invalid
        );
        assert_eq!(validator.validate(None, BODY), SignatureValidation::Missing);
        assert!(SignatureValidation::Missing.is_accepted());
    }

    #[test]
    fn test_signed_request_without_secret_is_rejected() {
        let validator = WebhookSignatureValidator::new(None);
        let result = validator.validate(Some("abc"), BODY);
        assert_eq!(result, SignatureValidation::NotConfigured);
        assert!(!result.is_accepted());
    }

    #[test]
    fn test_parse_order_paid() {
        let event = ConektaEvent::parse(BODY).unwrap();
        assert_eq!(event.event_type(), "order.paid");

        let order = event.order().unwrap();
        assert_eq!(order.amount, 31_000);
        assert_eq!(order.customer_info.name, "Ana");
        assert_eq!(order.our_order_id(), Some("abc-123"));
    }

    #[test]
    fn test_parse_order_with_null_fields() {
        let body = br#"{"type":"order.paid","data":{"object":{"id":null,"amount":null,"currency":null,"customer_info":{"name":"Ana","phone":null},"metadata":{"order_id":"abc-123"}}}}"#;
        let event = ConektaEvent::parse(body).unwrap();

        let order = event.order().unwrap();
        assert_eq!(order.customer_info.name, "Ana");
        assert_eq!(order.customer_info.phone, "");
        assert_eq!(order.amount, 0);
        assert_eq!(order.our_order_id(), Some("abc-123"));

        let event =
            ConektaEvent::parse(br#"{"type":"order.expired","data":{"object":{"customer_info":null}}}"#)
                .unwrap();
        assert_eq!(event.order().unwrap().customer_info, ConektaCustomerInfo::default());

        let event = ConektaEvent::parse(
            br#"{"type":"charge.paid","data":{"object":{"id":null,"amount":null,"order_id":null}}}"#,
        )
        .unwrap();
        assert_eq!(event, ConektaEvent::ChargePaid(ConektaChargeObject::default()));
    }

    #[test]
    fn test_parse_unknown_and_malformed() {
        let event = ConektaEvent::parse(br#"{"type":"customer.created","data":{"object":{}}}"#)
            .unwrap();
        assert_eq!(event, ConektaEvent::Other("customer.created".to_owned()));
        assert!(ConektaEvent::parse(b"not json").is_err());
    }
}
