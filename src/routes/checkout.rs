// ABOUTME: Route handler for checkout
// ABOUTME: Turns a submitted cart into a pending order and a hosted payment link
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use crate::server::ServerResources;
use crate::services::{CheckoutRequest, CheckoutService};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

/// Checkout routes implementation
pub struct CheckoutRoutes;

impl CheckoutRoutes {
    /// Create all checkout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/checkout", post(Self::handle_checkout))
            .with_state(resources)
    }

    /// Handle POST /api/checkout
    async fn handle_checkout(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CheckoutRequest>,
    ) -> Result<Response, AppError> {
        let service = CheckoutService::new(
            &resources.database,
            resources.payments.as_ref(),
            &resources.zones,
            resources.config.shipping,
            &resources.config.public_base_url,
        );

        let response = service.place_order(&request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }
}
