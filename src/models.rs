// ABOUTME: Core data models re-exported from muscle-meals-core
// ABOUTME: Re-exports Meal, Size, Package, Order and the other storefront records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Records are defined once in the core crate so the calculation and provider
//! crates see the same types as the database layer.

pub use muscle_meals_core::models::*;
