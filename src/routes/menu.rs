// ABOUTME: Route handlers for the public menu
// ABOUTME: Meals with recipes and macros, build-your-own packages and pickup spots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use crate::server::ServerResources;
use crate::services::menu;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Optional size selection in query strings
#[derive(Debug, Default, Deserialize)]
pub struct SizeQuery {
    /// Size to price or compute macros for
    pub size_id: Option<String>,
}

/// Menu routes implementation
pub struct MenuRoutes;

impl MenuRoutes {
    /// Create all menu routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/menu", get(Self::handle_menu))
            .route("/api/meals/:id", get(Self::handle_meal))
            .route("/api/meals/:id/macros", get(Self::handle_meal_macros))
            .route("/api/packages", get(Self::handle_packages))
            .route("/api/packages/:id", get(Self::handle_package))
            .route("/api/pickup-spots", get(Self::handle_pickup_spots))
            .with_state(resources)
    }

    /// Handle GET /api/menu
    async fn handle_menu(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let meals = menu::list_menu(&resources.database).await?;
        Ok((StatusCode::OK, Json(meals)).into_response())
    }

    /// Handle GET /api/meals/:id
    async fn handle_meal(
        State(resources): State<Arc<ServerResources>>,
        Path(meal_id): Path<String>,
    ) -> Result<Response, AppError> {
        let detail = menu::meal_detail(&resources.database, &meal_id).await?;
        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle GET /api/meals/:id/macros?size_id=
    async fn handle_meal_macros(
        State(resources): State<Arc<ServerResources>>,
        Path(meal_id): Path<String>,
        Query(query): Query<SizeQuery>,
    ) -> Result<Response, AppError> {
        let size_id = query
            .size_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("size_id"))?;

        let macros = menu::meal_macros(&resources.database, &meal_id, &size_id).await?;
        Ok((StatusCode::OK, Json(macros)).into_response())
    }

    /// Handle GET /api/packages
    async fn handle_packages(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let packages = menu::active_packages(&resources.database).await?;
        Ok((StatusCode::OK, Json(packages)).into_response())
    }

    /// Handle GET /api/packages/:id?size_id=
    async fn handle_package(
        State(resources): State<Arc<ServerResources>>,
        Path(package_id): Path<String>,
        Query(query): Query<SizeQuery>,
    ) -> Result<Response, AppError> {
        let detail =
            menu::package_detail(&resources.database, &package_id, query.size_id.as_deref())
                .await?;
        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle GET /api/pickup-spots
    async fn handle_pickup_spots(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let spots = menu::active_pickup_spots(&resources.database).await?;
        Ok((StatusCode::OK, Json(spots)).into_response())
    }
}
