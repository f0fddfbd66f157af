// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod commands;
pub mod location;
pub mod navigation;
pub mod persistence;
pub mod store;

pub use commands::{dispatch, Command, Effect};
pub use location::{ConfiguredLocation, LocationProvider};
pub use navigation::Navigator;
pub use persistence::{PersistenceError, WorkoutRecord, WorkoutRepository};
pub use store::{Mutation, WorkoutStore};
