// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Lets the storefront frontend call the API from its own origin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::environment::ServerConfig;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS for the storefront API
///
/// Origins come from `CORS_ALLOWED_ORIGINS`. An empty value or `*` allows
/// any origin; otherwise the comma separated list is used and entries that
/// are not valid header values are dropped.
///
/// # Examples
///
/// ```bash
/// # Allow all origins (development)
/// export CORS_ALLOWED_ORIGINS="*"
///
/// # Allow the storefront only (production)
/// export CORS_ALLOWED_ORIGINS="https://musclemeals.mx,https://www.musclemeals.mx"
/// ```
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.cors_allowed_origins))
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("access-control-request-method"),
            HeaderName::from_static("access-control-request-headers"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

fn allow_origin(setting: &str) -> AllowOrigin {
    let setting = setting.trim();
    if setting.is_empty() || setting == "*" {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = setting
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        // Nothing parsed, fall back to any
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}
