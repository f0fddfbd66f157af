// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;
use tokio::sync::Mutex;
use workout_tracker::config::Config;
use workout_tracker::db::{MemoryStorage, SharedStorage};
use workout_tracker::models::{Coordinates, MapView, NewWorkout, WorkoutKind};
use workout_tracker::routes::create_router;
use workout_tracker::services::{Navigator, WorkoutRepository, WorkoutStore};
use workout_tracker::time_utils::FixedClock;
use workout_tracker::AppState;

/// 2024-04-14T09:30:00Z
#[allow(dead_code)]
pub const APRIL_14_MILLIS: i64 = 1_713_087_000_000;

/// Store over in-memory storage with a pinned clock.
#[allow(dead_code)]
pub fn test_store() -> WorkoutStore<MemoryStorage> {
    WorkoutStore::new(WorkoutRepository::new(MemoryStorage::new(), "workouts"))
        .with_clock(FixedClock::from_millis(APRIL_14_MILLIS))
}

#[allow(dead_code)]
pub fn running(distance: f64, duration: f64, cadence: f64) -> NewWorkout {
    NewWorkout::new(
        WorkoutKind::Running,
        Coordinates::new(41.39, 2.16),
        distance,
        duration,
        cadence,
    )
}

#[allow(dead_code)]
pub fn cycling(distance: f64, duration: f64, elevation: f64) -> NewWorkout {
    NewWorkout::new(
        WorkoutKind::Cycling,
        Coordinates::new(41.39, 2.16),
        distance,
        duration,
        elevation,
    )
}

/// Create a test app over in-memory storage.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let map_view = config.home_position.map(|center| MapView {
        center,
        zoom: config.map_zoom,
    });
    build_app(config, map_view)
}

/// Create a test app whose location lookup failed at startup.
#[allow(dead_code)]
pub fn create_test_app_without_location() -> (axum::Router, Arc<AppState>) {
    let config = Config {
        home_position: None,
        ..Config::default()
    };
    build_app(config, None)
}

#[allow(dead_code)]
fn build_app(config: Config, map_view: Option<MapView>) -> (axum::Router, Arc<AppState>) {
    let storage: SharedStorage = Box::new(MemoryStorage::new());
    let store = WorkoutStore::new(WorkoutRepository::new(storage, config.storage_key.clone()))
        .with_clock(FixedClock::from_millis(APRIL_14_MILLIS));

    let state = Arc::new(AppState {
        navigator: Navigator::new(config.map_zoom),
        config,
        store: Mutex::new(store),
        map_view,
    });

    (create_router(state.clone()), state)
}
