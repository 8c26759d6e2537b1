// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Exposes environment-driven server, payment, messaging and shipping settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Muscle Meals server
//!
//! All settings come from environment variables, see
//! [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    ConektaSettings, Environment, HttpClientSettings, ServerConfig, ShippingConfig,
    WhatsAppSettings,
};
