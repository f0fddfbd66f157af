// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Tracker: record runs and rides on a map
//!
//! This crate provides the workout model, the validated in-memory workout
//! store with its local persistence, and the JSON API the map front end uses.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SharedStorage;
use models::MapView;
use services::{Navigator, WorkoutStore};
use tokio::sync::Mutex;

/// Shared application state.
///
/// The store sits behind a single lock so commands apply one at a time.
pub struct AppState {
    pub config: Config,
    pub store: Mutex<WorkoutStore<SharedStorage>>,
    pub navigator: Navigator,
    /// `None` when the user's position could not be determined at startup.
    pub map_view: Option<MapView>,
}
