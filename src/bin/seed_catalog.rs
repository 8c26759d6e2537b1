// ABOUTME: Demo catalog seeding utility for the Muscle Meals server
// ABOUTME: Creates meals, recipes, catalog sizes, packages and pickup spots in a fresh database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo catalog seeder.
//!
//! Usage:
//! ```bash
//! # Seed using DATABASE_URL from environment
//! cargo run --bin seed-catalog
//!
//! # Override database URL
//! cargo run --bin seed-catalog -- --database-url sqlite:./data/muscle_meals.db
//!
//! # Verbose output
//! cargo run --bin seed-catalog -- -v
//! ```

use anyhow::Result;
use clap::Parser;
use muscle_meals_server::{
    constants::{defaults, env_config},
    database::{seed::seed_demo_catalog, Database},
};
use std::env;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "Muscle Meals demo catalog seeder",
    long_about = "Create a demo menu with catalog sizes, packages and pickup spots"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let database_url = args.database_url.unwrap_or_else(|| {
        env::var(env_config::DATABASE_URL).unwrap_or_else(|_| defaults::DATABASE_URL.to_owned())
    });

    info!("Connecting to database: {}", database_url);
    let database = Database::new(&database_url).await?;

    let existing = database.sizes().list_main_sizes().await?;
    if !existing.is_empty() {
        info!(
            "Catalog already seeded ({} catalog sizes found), nothing to do",
            existing.len()
        );
        return Ok(());
    }

    let seeded = seed_demo_catalog(&database).await?;

    info!("Demo catalog created:");
    info!("   Meals:        {}, {}", seeded.chicken_meal_id, seeded.beef_meal_id);
    info!(
        "   Sizes:        LOW {}, FIT {}, PLUS {}",
        seeded.low_size_id, seeded.fit_size_id, seeded.plus_size_id
    );
    info!(
        "   Packages:     5 meals {}, 10 meals {}",
        seeded.package_5_id, seeded.package_10_id
    );
    info!("   Pickup spot:  {}", seeded.pickup_spot_id);

    Ok(())
}
