// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout persistence: typed workouts to a flat JSON blob and back.
//!
//! The blob is an array of flat records, one per workout, in display order.
//! Field names match what the browser app kept in local storage, so blobs
//! written by it load unchanged. On load each record is revived into the
//! variant named by its `type` field with every value copied as stored;
//! descriptions and metrics are never recomputed.

use serde::{Deserialize, Serialize};

use crate::db::{KeyValueStorage, StorageError};
use crate::models::{Coordinates, Workout, WorkoutDetails};
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339};

/// Flat persisted form of a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    /// Creation timestamp (RFC3339)
    pub date: String,
    /// [latitude, longitude]
    pub coords: (f64, f64),
    /// Kilometres
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub details: RecordDetails,
}

/// Variant-specific fields, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecordDetails {
    Running { cadence: u32, pace: f64 },
    Cycling { elevation: f64, speed: f64 },
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let details = match workout.details {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => RecordDetails::Running {
                cadence: cadence_spm,
                pace: pace_min_per_km,
            },
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => RecordDetails::Cycling {
                elevation: elevation_gain_m,
                speed: speed_km_per_h,
            },
        };

        Self {
            id: workout.id.clone(),
            date: format_utc_rfc3339(workout.created_at),
            coords: (workout.coordinates.latitude, workout.coordinates.longitude),
            distance: workout.distance_km,
            duration: workout.duration_min,
            description: workout.description.clone(),
            clicks: workout.interaction_count,
            details,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = PersistenceError;

    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let created_at = parse_utc_rfc3339(&record.date).map_err(|e| {
            PersistenceError::Corrupt(format!(
                "workout {} has invalid date {:?}: {}",
                record.id, record.date, e
            ))
        })?;

        let details = match record.details {
            RecordDetails::Running { cadence, pace } => WorkoutDetails::Running {
                cadence_spm: cadence,
                pace_min_per_km: pace,
            },
            RecordDetails::Cycling { elevation, speed } => WorkoutDetails::Cycling {
                elevation_gain_m: elevation,
                speed_km_per_h: speed,
            },
        };

        Ok(Workout {
            id: record.id,
            created_at,
            coordinates: Coordinates::new(record.coords.0, record.coords.1),
            distance_km: record.distance,
            duration_min: record.duration,
            description: record.description,
            interaction_count: record.clicks,
            details,
        })
    }
}

/// Serialize workouts into the persisted text form.
pub fn encode(workouts: &[Workout]) -> Result<String, PersistenceError> {
    let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
    serde_json::to_string(&records).map_err(|e| PersistenceError::Corrupt(e.to_string()))
}

/// Parse the persisted text form into raw records.
///
/// The blob must be a JSON array. Elements that are not valid records are
/// skipped with a warning rather than discarding the whole collection.
pub fn decode(blob: &str) -> Result<Vec<WorkoutRecord>, PersistenceError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(blob).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<WorkoutRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable workout record");
            }
        }
    }
    Ok(records)
}

/// Loads and saves the workout collection under one storage key.
pub struct WorkoutRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> WorkoutRepository<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write the full collection, replacing what was stored.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), PersistenceError> {
        let blob = encode(workouts)?;
        self.storage.set_string(&self.key, &blob)?;
        tracing::debug!(key = %self.key, count = workouts.len(), "Saved workouts");
        Ok(())
    }

    /// Read raw records. Nothing stored yet is an empty collection.
    pub fn load(&self) -> Result<Vec<WorkoutRecord>, PersistenceError> {
        match self.storage.get_string(&self.key)? {
            Some(blob) => decode(&blob),
            None => Ok(Vec::new()),
        }
    }

    /// Drop the stored blob entirely.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.storage.remove(&self.key)?;
        tracing::debug!(key = %self.key, "Cleared stored workouts");
        Ok(())
    }
}

/// Errors from persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Stored workouts are unreadable: {0}")]
    Corrupt(String),
}

impl From<StorageError> for PersistenceError {
    fn from(err: StorageError) -> Self {
        PersistenceError::Unavailable(err.to_string())
    }
}
