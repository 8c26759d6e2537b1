// ABOUTME: Error type shared by the payment and messaging provider clients
// ABOUTME: Converts into AppError so services can propagate with `?`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use muscle_meals_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Failure talking to an external provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider answered with a non-success status
    #[error("{provider} API error ({status_code}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status returned
        status_code: u16,
        /// Message extracted from the error body
        message: String,
        /// Whether a retry might succeed
        retryable: bool,
    },

    /// Request never produced a response
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response or webhook body could not be decoded
    #[error("{provider} returned malformed {field}: {source}")]
    ParseError {
        /// Provider name
        provider: String,
        /// What was being parsed
        field: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Provider is missing credentials or settings
    #[error("{provider} is not configured: {details}")]
    ConfigurationError {
        /// Provider name
        provider: String,
        /// What is missing
        details: String,
    },
}

impl ProviderError {
    /// Provider-facing message without the status prefix
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let app_error = match &error {
            ProviderError::ApiError { provider, .. } => {
                Self::external_service(provider.clone(), error.user_message())
            }
            ProviderError::NetworkError(message) => {
                Self::new(ErrorCode::ExternalServiceUnavailable, message.clone())
            }
            ProviderError::ParseError { provider, .. } => {
                Self::external_service(provider.clone(), error.to_string())
            }
            ProviderError::ConfigurationError { .. } => Self::config(error.to_string()),
        };
        app_error.with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_to_external_service() {
        let error = ProviderError::ApiError {
            provider: "conekta".to_owned(),
            status_code: 422,
            message: "The card was declined".to_owned(),
            retryable: false,
        };

        let app_error = AppError::from(error);

        assert_eq!(app_error.code, ErrorCode::ExternalServiceError);
        assert_eq!(app_error.message, "conekta: The card was declined");
        let source = std::error::Error::source(&app_error).unwrap();
        assert!(source.to_string().contains("(422)"));
    }

    #[test]
    fn test_network_error_maps_to_unavailable() {
        let app_error = AppError::from(ProviderError::NetworkError("timed out".to_owned()));
        assert_eq!(app_error.code, ErrorCode::ExternalServiceUnavailable);
    }
}
