// ABOUTME: Delivery address formatting and contact validation helpers
// ABOUTME: Postal code shape, ten digit phones, and WhatsApp phone formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Structured delivery address captured at checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    /// Street name
    pub street: String,
    /// Exterior number
    pub ext_number: String,
    /// Interior number (apartment, suite)
    #[serde(default)]
    pub int_number: Option<String>,
    /// Neighbourhood
    pub colonia: String,
    /// Five digit postal code
    pub postal_code: String,
    /// City
    pub city: String,
    /// State
    pub state: String,
}

impl DeliveryAddress {
    /// Single-line address, skipping empty parts
    #[must_use]
    pub fn full_address(&self) -> String {
        let interior = self
            .int_number
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| format!("Int. {value}"))
            .unwrap_or_default();

        [
            self.street.clone(),
            self.ext_number.clone(),
            interior,
            format!("Col. {}", self.colonia),
            format!("C.P. {}", self.postal_code),
            self.city.clone(),
            self.state.clone(),
            "México".to_owned(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Whether `cp` is exactly five ASCII digits
#[must_use]
pub fn is_well_formed_postal_code(cp: &str) -> bool {
    cp.len() == 5 && cp.bytes().all(|b| b.is_ascii_digit())
}

fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Whether the phone has exactly ten digits once formatting is stripped
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone_digits(phone).len() == 10
}

/// International format expected by WhatsApp (`8112345678` -> `+5218112345678`)
///
/// Numbers that already carry the Mexican country code (`52` or `521`)
/// keep it as given.
#[must_use]
pub fn whatsapp_phone(phone: &str) -> String {
    let digits = phone_digits(phone);
    let international = match digits.len() {
        13 => digits.starts_with("521"),
        12 => digits.starts_with("52"),
        _ => false,
    };

    if international {
        format!("+{digits}")
    } else {
        format!("+521{digits}")
    }
}
