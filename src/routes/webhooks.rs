// ABOUTME: Route handler for payment gateway webhooks
// ABOUTME: Verifies the Conekta signature, parses the event and hands it to the webhook service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Conekta webhook route
//!
//! Responses use a flat JSON body so the gateway dashboard shows a readable
//! reason. Any non-2xx answer makes Conekta retry the delivery.

use crate::logging::AppLogger;
use crate::server::ServerResources;
use crate::services::WebhookService;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use muscle_meals_providers::conekta::{ConektaEvent, SignatureValidation, SIGNATURE_HEADER};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

const PROVIDER: &str = "conekta";

/// Webhook routes implementation
pub struct WebhookRoutes;

impl WebhookRoutes {
    /// Create all webhook routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/webhooks/conekta", post(Self::handle_conekta))
            .with_state(resources)
    }

    /// Handle POST /api/webhooks/conekta
    async fn handle_conekta(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok());

        let validation = resources.webhook_validator.validate(signature, &body);
        if !validation.is_accepted() {
            AppLogger::log_webhook_rejected(PROVIDER, rejection_reason(validation));
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid signature" })),
            )
                .into_response();
        }

        let event = match ConektaEvent::parse(&body) {
            Ok(event) => event,
            Err(e) => {
                error!(error = %e, "Failed to parse Conekta webhook");
                return processing_failed();
            }
        };

        let service = WebhookService::new(&resources.database, resources.notifier());
        match service.handle_event(&event).await {
            Ok(()) => (StatusCode::OK, Json(json!({ "received": true }))).into_response(),
            Err(e) => {
                error!(
                    error = %e,
                    webhook.event = %event.event_type(),
                    "Failed to process Conekta webhook"
                );
                processing_failed()
            }
        }
    }
}

fn rejection_reason(validation: SignatureValidation) -> &'static str {
    match validation {
        SignatureValidation::NotConfigured => "signature present but no secret configured",
        SignatureValidation::Invalid => "signature mismatch",
        SignatureValidation::Valid | SignatureValidation::Missing => "accepted",
    }
}

fn processing_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Webhook processing failed" })),
    )
        .into_response()
}
