// ABOUTME: Route handlers for order lookups
// ABOUTME: Serves the order summary shown after returning from the payment page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Order routes implementation
pub struct OrderRoutes;

impl OrderRoutes {
    /// Create all order routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/orders/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/orders/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(order_id): Path<String>,
    ) -> Result<Response, AppError> {
        let order = resources
            .database
            .orders()
            .get_order_with_items(&order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order").with_resource_id(&order_id))?;

        Ok((StatusCode::OK, Json(order)).into_response())
    }
}
