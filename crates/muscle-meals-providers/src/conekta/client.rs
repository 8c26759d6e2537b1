// ABOUTME: Conekta REST client creating hosted checkout and card orders
// ABOUTME: Implements PaymentGateway over the shared HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tracing::{error, info};

use muscle_meals_core::constants::defaults::CONEKTA_API_URL;

use super::models::{ConektaErrorResponse, ConektaOrderBody, ConektaOrderResponse};
use crate::core::{PaymentGateway, PaymentOrder, PaymentOrderRequest};
use crate::errors::ProviderError;
use crate::http_client::shared_client;

/// API version negotiated through the `Accept` header
const CONEKTA_ACCEPT: &str = "application/vnd.conekta-v2.1.0+json";

const PROVIDER: &str = "conekta";

/// Conekta API settings
#[derive(Debug, Clone)]
pub struct ConektaConfig {
    /// API base URL without trailing slash
    pub api_url: String,
    /// Private API key
    pub private_key: String,
}

impl ConektaConfig {
    /// Production API with the given key
    #[must_use]
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            api_url: CONEKTA_API_URL.to_owned(),
            private_key: private_key.into(),
        }
    }
}

/// Conekta payment gateway client
pub struct ConektaClient {
    config: ConektaConfig,
}

impl ConektaClient {
    /// Create a client
    #[must_use]
    pub const fn new(config: ConektaConfig) -> Self {
        Self { config }
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for ConektaClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn create_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> Result<PaymentOrder, ProviderError> {
        if self.config.private_key.is_empty() {
            return Err(ProviderError::ConfigurationError {
                provider: PROVIDER.to_owned(),
                details: "private key is empty".to_owned(),
            });
        }

        let body = ConektaOrderBody::from(request);

        let response = shared_client()
            .post(self.orders_url())
            .header("Accept", CONEKTA_ACCEPT)
            .bearer_auth(&self.config.private_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = serde_json::from_str::<ConektaErrorResponse>(&text)
                .ok()
                .and_then(|e| e.first_message().map(ToOwned::to_owned))
                .unwrap_or_else(|| "Error creating the Conekta order".to_owned());
            error!(
                order_id = %request.order_id,
                status = status.as_u16(),
                body = %text,
                "Conekta rejected order"
            );
            return Err(ProviderError::ApiError {
                provider: PROVIDER.to_owned(),
                status_code: status.as_u16(),
                message,
                retryable: status.is_server_error(),
            });
        }

        let order: ConektaOrderResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::ParseError {
                provider: PROVIDER.to_owned(),
                field: "order_response",
                source: e,
            })?;

        info!(
            order_id = %request.order_id,
            conekta_order_id = %order.id,
            "Conekta order created"
        );

        Ok(PaymentOrder {
            gateway_order_id: order.id,
            checkout_url: order.checkout.and_then(|c| c.url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PaymentCustomer, PaymentMethod};

    #[test]
    fn test_orders_url_trims_slash() {
        let client = ConektaClient::new(ConektaConfig {
            api_url: "https://api.conekta.io/".to_owned(),
            private_key: "key_test".to_owned(),
        });
        assert_eq!(client.orders_url(), "https://api.conekta.io/orders");
    }

    #[tokio::test]
    async fn test_empty_key_is_configuration_error() {
        let client = ConektaClient::new(ConektaConfig::new(""));
        let request = PaymentOrderRequest {
            order_id: "order-1".to_owned(),
            customer: PaymentCustomer {
                name: "Ana".to_owned(),
                phone: "8112345678".to_owned(),
            },
            line_items: vec![],
            method: PaymentMethod::CardToken {
                token_id: "tok".to_owned(),
            },
        };

        let result = client.create_order(&request).await;

        assert!(matches!(
            result,
            Err(ProviderError::ConfigurationError { .. })
        ));
    }
}
