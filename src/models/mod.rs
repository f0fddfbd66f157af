// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod view;
pub mod workout;

pub use view::{MapView, Marker, NavigationRequest, WorkoutRow};
pub use workout::{
    Coordinates, NewWorkout, VariantInput, Workout, WorkoutDetails, WorkoutKind,
};
