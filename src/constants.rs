// ABOUTME: Re-exports application constants from muscle-meals-core
// ABOUTME: Keeps pricing tables, env var names and defaults identical across crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use muscle_meals_core::constants::*;
