// ABOUTME: Re-exports the unified error types from muscle-meals-core
// ABOUTME: Ensures AppError/ErrorCode are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use muscle_meals_core::errors::*;
