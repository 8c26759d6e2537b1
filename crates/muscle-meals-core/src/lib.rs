// ABOUTME: Core types and constants for the Muscle Meals storefront
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Muscle Meals Core
//!
//! Foundation crate providing shared types and constants for the storefront.
//! It has no I/O and changes rarely, so the calculation and provider crates
//! can depend on it without pulling in the server stack.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Pricing tables, portion limits, and environment variable names
//! - **models**: Catalog, size, customer, and order records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
