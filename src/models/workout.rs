// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: the shared session fields plus the running and cycling variants.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;

/// A point on the map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Workout type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase identifier used in storage and as the form selector value.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }

    pub fn metric_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "min/km",
            WorkoutKind::Cycling => "km/h",
        }
    }

    /// Name of the variant-specific input (the form shows only this row).
    pub fn extra_field(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "cadence",
            WorkoutKind::Cycling => "elevation",
        }
    }

    pub fn extra_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "spm",
            WorkoutKind::Cycling => "m",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

/// Variant payload. The derived metric is stored, never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutDetails {
    Running {
        cadence_spm: u32,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace for running, speed for cycling.
    pub fn metric(&self) -> f64 {
        match self {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => *pace_min_per_km,
            WorkoutDetails::Cycling { speed_km_per_h, .. } => *speed_km_per_h,
        }
    }

    /// Cadence for running, elevation gain for cycling.
    pub fn extra_value(&self) -> f64 {
        match self {
            WorkoutDetails::Running { cadence_spm, .. } => f64::from(*cadence_spm),
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => *elevation_gain_m,
        }
    }
}

/// Raw variant-specific input as delivered by the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantInput {
    Running { cadence_spm: f64 },
    Cycling { elevation_gain_m: f64 },
}

/// Unvalidated request to create a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewWorkout {
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub variant: VariantInput,
}

impl NewWorkout {
    /// `variant_field` is cadence for running and elevation gain for cycling.
    pub fn new(
        kind: WorkoutKind,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        variant_field: f64,
    ) -> Self {
        let variant = match kind {
            WorkoutKind::Running => VariantInput::Running {
                cadence_spm: variant_field,
            },
            WorkoutKind::Cycling => VariantInput::Cycling {
                elevation_gain_m: variant_field,
            },
        };
        Self {
            coordinates,
            distance_km,
            duration_min,
            variant,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.variant {
            VariantInput::Running { .. } => WorkoutKind::Running,
            VariantInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A recorded workout session.
///
/// Everything except `interaction_count` is fixed once the store creates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub(crate) id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) coordinates: Coordinates,
    pub(crate) distance_km: f64,
    pub(crate) duration_min: f64,
    pub(crate) description: String,
    pub(crate) interaction_count: u32,
    pub(crate) details: WorkoutDetails,
}

impl Workout {
    /// Build a workout from input the store has already validated.
    pub(crate) fn from_validated(
        id: String,
        created_at: DateTime<Utc>,
        input: &NewWorkout,
        display_offset: FixedOffset,
    ) -> Self {
        let details = match input.variant {
            VariantInput::Running { cadence_spm } => WorkoutDetails::Running {
                cadence_spm: cadence_spm as u32,
                pace_min_per_km: pace(input.distance_km, input.duration_min),
            },
            VariantInput::Cycling { elevation_gain_m } => WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h: speed(input.distance_km, input.duration_min),
            },
        };

        Self {
            id,
            description: describe(
                details.kind(),
                created_at.with_timezone(&display_offset),
            ),
            created_at,
            coordinates: input.coordinates,
            distance_km: input.distance_km,
            duration_min: input.duration_min,
            interaction_count: 0,
            details,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub fn metric(&self) -> f64 {
        self.details.metric()
    }

    pub(crate) fn record_interaction(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }
}

/// Minutes per kilometre.
pub fn pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Kilometres per hour.
pub fn speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// "Running on April 14", dated in whatever offset `created_at` carries.
pub fn describe<Tz: TimeZone>(kind: WorkoutKind, created_at: DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{} on {}", kind.label(), created_at.format("%B %-d"))
}
