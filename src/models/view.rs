// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation payloads handed to the map and list front end.
//!
//! These are always built from a stored [`Workout`], never from form state.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::workout::{Coordinates, Workout, WorkoutKind};
use crate::time_utils::format_utc_rfc3339;

/// Map marker with its popup content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marker {
    pub id: String,
    pub coordinates: Coordinates,
    pub glyph: String,
    pub description: String,
    /// CSS class for the popup, e.g. "running-popup"
    pub popup_class: String,
}

impl From<&Workout> for Marker {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            id: workout.id().to_string(),
            coordinates: workout.coordinates(),
            glyph: kind.glyph().to_string(),
            description: workout.description().to_string(),
            popup_class: format!("{}-popup", kind.as_str()),
        }
    }
}

/// One row of the workout list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutRow {
    pub id: String,
    pub kind: WorkoutKind,
    pub glyph: String,
    pub description: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Pace or speed as stored
    pub metric_value: f64,
    /// Metric rounded to one decimal for display
    pub metric_display: String,
    pub metric_unit: String,
    /// "cadence" or "elevation"
    pub extra_field: String,
    pub extra_value: f64,
    pub extra_unit: String,
    pub interaction_count: u32,
}

impl From<&Workout> for WorkoutRow {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        let details = workout.details();
        Self {
            id: workout.id().to_string(),
            kind,
            glyph: kind.glyph().to_string(),
            description: workout.description().to_string(),
            created_at: format_utc_rfc3339(workout.created_at()),
            coordinates: workout.coordinates(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            metric_value: details.metric(),
            metric_display: format!("{:.1}", details.metric()),
            metric_unit: kind.metric_unit().to_string(),
            extra_field: kind.extra_field().to_string(),
            extra_value: details.extra_value(),
            extra_unit: kind.extra_unit().to_string(),
            interaction_count: workout.interaction_count(),
        }
    }
}

/// Request for the map to center on a workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NavigationRequest {
    pub id: String,
    pub coordinates: Coordinates,
    pub zoom: u8,
    pub animate: bool,
    pub pan_duration_secs: f64,
}

/// Initial map view, centered on the user's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}
