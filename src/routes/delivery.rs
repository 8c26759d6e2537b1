// ABOUTME: Route handlers for delivery area lookups
// ABOUTME: Tells the checkout form whether a postal code is served and in which zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use muscle_meals_calc::is_well_formed_postal_code;
use serde::Serialize;
use std::sync::Arc;

/// Result of a postal code lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostalCodeCheck {
    /// Code as received, trimmed
    pub postal_code: String,
    /// Five digits, inside a zone and not excluded
    pub valid: bool,
    /// Matching zone name, present even for excluded codes
    pub zone: Option<String>,
}

/// Delivery routes implementation
pub struct DeliveryRoutes;

impl DeliveryRoutes {
    /// Create all delivery routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/delivery/postal-codes/:cp", get(Self::handle_check))
            .with_state(resources)
    }

    /// Handle GET /api/delivery/postal-codes/:cp
    async fn handle_check(
        State(resources): State<Arc<ServerResources>>,
        Path(cp): Path<String>,
    ) -> Json<PostalCodeCheck> {
        let cp = cp.trim();
        if !is_well_formed_postal_code(cp) {
            return Json(PostalCodeCheck {
                postal_code: cp.to_owned(),
                valid: false,
                zone: None,
            });
        }

        Json(PostalCodeCheck {
            postal_code: cp.to_owned(),
            valid: resources.zones.is_valid_postal_code(cp),
            zone: resources.zones.find_zone(cp).map(|zone| zone.name.clone()),
        })
    }
}
