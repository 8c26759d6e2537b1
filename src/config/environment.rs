// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, payment/messaging credentials, and shipping costs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_config, ports};
use crate::models::ShippingMethod;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::{info, warn};

/// Environment type for logging and startup checks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Live storefront
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Conekta payment gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConektaSettings {
    /// REST API base URL
    pub api_url: String,
    /// Private API key
    pub private_key: String,
    /// Secret used to verify `x-conekta-signature`
    pub webhook_secret: Option<String>,
}

/// `WhatsApp` Cloud API settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhatsAppSettings {
    /// Business phone number id
    pub phone_id: Option<String>,
    /// Bearer access token
    pub access_token: Option<String>,
    /// Phone that receives internal order alerts
    pub owner_phone: Option<String>,
}

impl WhatsAppSettings {
    /// Both the phone id and the access token are present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.phone_id.is_some() && self.access_token.is_some()
    }
}

/// Shipping costs in centavos
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingConfig {
    /// Standard delivery
    pub standard_cost: i64,
    /// Priority delivery
    pub priority_cost: i64,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            standard_cost: defaults::SHIPPING_STANDARD_COST,
            priority_cost: defaults::SHIPPING_PRIORITY_COST,
        }
    }
}

impl ShippingConfig {
    /// Cost charged for a shipping method; pickup is free
    #[must_use]
    pub const fn cost_for(&self, method: ShippingMethod) -> i64 {
        match method {
            ShippingMethod::Standard => self.standard_cost,
            ShippingMethod::Priority => self.priority_cost,
            ShippingMethod::Pickup => 0,
        }
    }
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HttpClientSettings {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::HTTP_CLIENT_TIMEOUT_SECS,
            connect_timeout_secs: defaults::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// HTTP listen port
    pub http_port: u16,
    /// `SQLite` connection string
    pub database_url: String,
    /// Public storefront URL used in payment redirects
    pub public_base_url: String,
    /// Payment gateway
    pub conekta: ConektaSettings,
    /// Messaging channel
    pub whatsapp: WhatsAppSettings,
    /// Shipping costs
    pub shipping: ShippingConfig,
    /// Postal codes inside a zone prefix that are not served
    pub excluded_postal_codes: Vec<String>,
    /// Outbound HTTP client timeouts
    pub http_client: HttpClientSettings,
    /// Comma separated browser origins, or `*`
    pub cors_allowed_origins: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `CONEKTA_PRIVATE_KEY` is missing or a numeric
    /// variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            http_port: env_var_or(env_config::HTTP_PORT, &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            database_url: env_var_or(env_config::DATABASE_URL, defaults::DATABASE_URL),
            public_base_url: env_var_or(env_config::PUBLIC_BASE_URL, defaults::PUBLIC_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
            conekta: ConektaSettings {
                api_url: env_var_or(env_config::CONEKTA_API_URL, defaults::CONEKTA_API_URL),
                private_key: optional_var(env_config::CONEKTA_PRIVATE_KEY)
                    .context("CONEKTA_PRIVATE_KEY must be set")?,
                webhook_secret: optional_var(env_config::CONEKTA_WEBHOOK_SECRET),
            },
            whatsapp: WhatsAppSettings {
                phone_id: optional_var(env_config::WHATSAPP_PHONE_ID),
                access_token: optional_var(env_config::WHATSAPP_ACCESS_TOKEN),
                owner_phone: optional_var(env_config::WHATSAPP_OWNER_PHONE),
            },
            shipping: ShippingConfig {
                standard_cost: env_var_or(
                    env_config::SHIPPING_STANDARD_COST,
                    &defaults::SHIPPING_STANDARD_COST.to_string(),
                )
                .parse()
                .context("Invalid SHIPPING_STANDARD_COST value")?,
                priority_cost: env_var_or(
                    env_config::SHIPPING_PRIORITY_COST,
                    &defaults::SHIPPING_PRIORITY_COST.to_string(),
                )
                .parse()
                .context("Invalid SHIPPING_PRIORITY_COST value")?,
            },
            excluded_postal_codes: parse_list(&env_var_or(
                env_config::DELIVERY_EXCLUDED_POSTAL_CODES,
                "",
            )),
            http_client: HttpClientSettings {
                timeout_secs: env_var_or(
                    env_config::HTTP_CLIENT_TIMEOUT_SECS,
                    &defaults::HTTP_CLIENT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid HTTP_CLIENT_TIMEOUT_SECS value")?,
                connect_timeout_secs: env_var_or(
                    env_config::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                    &defaults::HTTP_CLIENT_CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid HTTP_CLIENT_CONNECT_TIMEOUT_SECS value")?,
            },
            cors_allowed_origins: env_var_or(env_config::CORS_ALLOWED_ORIGINS, "*"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    ///
    /// # Errors
    ///
    /// Returns an error if a shipping cost is negative
    pub fn validate(&self) -> Result<()> {
        if self.shipping.standard_cost < 0 || self.shipping.priority_cost < 0 {
            return Err(anyhow::anyhow!("Shipping costs cannot be negative"));
        }

        if self.conekta.webhook_secret.is_none() {
            warn!("CONEKTA_WEBHOOK_SECRET is not set; signed webhooks will be rejected");
        }

        if !self.whatsapp.is_configured() {
            warn!("WhatsApp credentials missing; notifications will only be logged");
        }

        if self.environment.is_production() && self.public_base_url.starts_with("http://localhost")
        {
            warn!("PUBLIC_BASE_URL points to localhost in production");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Muscle Meals Server Configuration:\n\
             - Environment: {}\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - Public URL: {}\n\
             - Conekta API: {}\n\
             - Webhook Signature: {}\n\
             - WhatsApp: {}\n\
             - Shipping: standard {} / priority {}\n\
             - Excluded Postal Codes: {}\n\
             - CORS Origins: {}",
            self.environment,
            self.http_port,
            self.database_url,
            self.public_base_url,
            self.conekta.api_url,
            if self.conekta.webhook_secret.is_some() {
                "Enabled"
            } else {
                "Disabled"
            },
            if self.whatsapp.is_configured() {
                "Enabled"
            } else {
                "Log only"
            },
            self.shipping.standard_cost,
            self.shipping.priority_cost,
            self.excluded_postal_codes.len(),
            self.cors_allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get a non-blank environment variable
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse a comma-separated list
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("64000, 66220 ,"), vec!["64000", "66220"]);
        assert_eq!(parse_list(""), Vec::<String>::new());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("unknown"),
            Environment::Development
        );
    }

    #[test]
    fn test_shipping_cost_for_method() {
        let shipping = ShippingConfig::default();
        assert_eq!(shipping.cost_for(ShippingMethod::Standard), 5_000);
        assert_eq!(shipping.cost_for(ShippingMethod::Priority), 9_900);
        assert_eq!(shipping.cost_for(ShippingMethod::Pickup), 0);
    }

    #[test]
    #[serial]
    fn test_from_env_requires_conekta_key() {
        env::remove_var(env_config::CONEKTA_PRIVATE_KEY);
        assert!(ServerConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        env::set_var(env_config::CONEKTA_PRIVATE_KEY, "key_test");
        env::set_var(env_config::DELIVERY_EXCLUDED_POSTAL_CODES, "64000,66220");
        env::remove_var(env_config::HTTP_PORT);
        env::remove_var(env_config::PUBLIC_BASE_URL);

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.http_port, ports::DEFAULT_HTTP_PORT);
        assert_eq!(config.public_base_url, defaults::PUBLIC_BASE_URL);
        assert_eq!(config.conekta.private_key, "key_test");
        assert_eq!(config.excluded_postal_codes, vec!["64000", "66220"]);

        env::remove_var(env_config::CONEKTA_PRIVATE_KEY);
        env::remove_var(env_config::DELIVERY_EXCLUDED_POSTAL_CODES);
    }
}
