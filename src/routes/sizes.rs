// ABOUTME: Route handlers for portion sizes
// ABOUTME: Lists catalog and customer sizes, quotes custom portions and creates custom sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use crate::server::ServerResources;
use crate::services::{menu, sizes, CustomSizeRequest, PortionRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Filter for GET /api/sizes
#[derive(Debug, Default, Deserialize)]
pub struct SizeListQuery {
    /// Return this customer's saved custom sizes instead of the catalog
    pub customer_id: Option<String>,
}

/// Size routes implementation
pub struct SizeRoutes;

impl SizeRoutes {
    /// Create all size routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/sizes", get(Self::handle_list))
            .route("/api/sizes/quote", post(Self::handle_quote))
            .route("/api/sizes/custom", post(Self::handle_create_custom))
            .route("/api/sizes/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/sizes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SizeListQuery>,
    ) -> Result<Response, AppError> {
        let sizes = match query.customer_id.as_deref().map(str::trim) {
            Some(customer_id) if !customer_id.is_empty() => {
                menu::custom_sizes(&resources.database, customer_id).await?
            }
            _ => menu::main_sizes(&resources.database).await?,
        };
        Ok((StatusCode::OK, Json(sizes)).into_response())
    }

    /// Handle GET /api/sizes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(size_id): Path<String>,
    ) -> Result<Response, AppError> {
        let size = menu::find_size(&resources.database, &size_id).await?;
        Ok((StatusCode::OK, Json(size)).into_response())
    }

    /// Handle POST /api/sizes/quote
    async fn handle_quote(Json(request): Json<PortionRequest>) -> Result<Response, AppError> {
        Ok((StatusCode::OK, Json(sizes::quote(&request))).into_response())
    }

    /// Handle POST /api/sizes/custom
    async fn handle_create_custom(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CustomSizeRequest>,
    ) -> Result<Response, AppError> {
        let size = sizes::create_custom_size(&resources.database, &request).await?;
        Ok((StatusCode::CREATED, Json(size)).into_response())
    }
}
