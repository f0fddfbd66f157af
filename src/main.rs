// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Keeps the user's runs and rides on local storage and serves them to the
//! map front end.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    db::{FileStorage, SharedStorage},
    services::{location, ConfiguredLocation, Navigator, WorkoutRepository, WorkoutStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout Tracker API");

    // Open local storage and restore saved workouts
    let storage: SharedStorage = Box::new(FileStorage::open(&config.data_dir)?);
    tracing::info!(dir = %config.data_dir.display(), "File storage opened");
    let store = WorkoutStore::open(WorkoutRepository::new(storage, config.storage_key.clone()))
        .with_display_offset(config.display_offset);
    tracing::info!(count = store.len(), "Saved workouts loaded");

    // Locate the user once; without a position the map stays uninitialized
    let provider = ConfiguredLocation::from_config(&config);
    let map_view = location::initialize_map(&provider, config.map_zoom).await;

    // Build shared state
    let state = Arc::new(AppState {
        navigator: Navigator::new(config.map_zoom),
        config: config.clone(),
        store: Mutex::new(store),
        map_view,
    });

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("workout_tracker=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
