// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The workout store: the authoritative, ordered collection of workouts.
//!
//! Every mutation is all-or-nothing. Input is validated before anything
//! changes, and the collection is saved once the mutation has been applied.
//! A failed save is reported as a warning on the returned [`Mutation`]; the
//! in-memory collection is still correct for the running process.

use std::collections::HashSet;

use crate::db::KeyValueStorage;
use crate::error::{AppError, Result, ValidationError};
use crate::models::{NewWorkout, VariantInput, Workout};
use crate::services::persistence::{PersistenceError, WorkoutRecord, WorkoutRepository};
use crate::time_utils::{utc_offset, Clock, SystemClock};
use chrono::FixedOffset;

/// Outcome of a store mutation.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    /// Set when the mutation was applied in memory but could not be saved.
    pub warning: Option<PersistenceError>,
}

pub struct WorkoutStore<S> {
    workouts: Vec<Workout>,
    repository: WorkoutRepository<S>,
    clock: Box<dyn Clock>,
    /// Offset used to date new workout descriptions.
    display_offset: FixedOffset,
    /// Highest numeric id issued or restored; new ids are always above it.
    last_id: u64,
}

impl<S: KeyValueStorage> WorkoutStore<S> {
    /// Empty store. Use [`WorkoutStore::open`] to pick up saved workouts.
    pub fn new(repository: WorkoutRepository<S>) -> Self {
        Self {
            workouts: Vec::new(),
            repository,
            clock: Box::new(SystemClock),
            display_offset: utc_offset(),
            last_id: 0,
        }
    }

    /// Store restored from whatever the repository holds.
    ///
    /// Unreadable storage is logged and treated as no prior state.
    pub fn open(repository: WorkoutRepository<S>) -> Self {
        let mut store = Self::new(repository);
        match store.repository.load() {
            Ok(records) => store.restore(records),
            Err(e) => {
                tracing::warn!(error = %e, "Could not load saved workouts, starting empty");
            }
        }
        store
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Date new descriptions in the user's local offset instead of UTC.
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    pub fn repository(&self) -> &WorkoutRepository<S> {
        &self.repository
    }

    /// Workouts in insertion (display) order.
    pub fn list(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Workout> {
        self.workouts
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Validate, append and save a new workout.
    pub fn create(
        &mut self,
        input: NewWorkout,
    ) -> std::result::Result<Mutation<Workout>, ValidationError> {
        validate(&input)?;

        let created_at = self.clock.now();
        let id = self.next_id(created_at.timestamp_millis());
        let workout = Workout::from_validated(id, created_at, &input, self.display_offset);
        tracing::info!(
            id = %workout.id,
            kind = %workout.kind(),
            distance_km = workout.distance_km,
            duration_min = workout.duration_min,
            "Workout created"
        );

        self.workouts.push(workout.clone());
        let warning = self.persist();
        Ok(Mutation {
            value: workout,
            warning,
        })
    }

    /// Remove the workout whose id matches and save.
    pub fn delete_by_id(&mut self, id: &str) -> Result<Mutation<Workout>> {
        let index = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        let removed = self.workouts.remove(index);
        tracing::info!(id = %removed.id, "Workout deleted");

        let warning = self.persist();
        Ok(Mutation {
            value: removed,
            warning,
        })
    }

    /// Replace the collection with workouts revived from raw records.
    ///
    /// Records that cannot be revived, and repeats of an id already seen,
    /// are skipped with a warning.
    pub fn restore(&mut self, records: Vec<WorkoutRecord>) {
        let mut seen = HashSet::new();
        let mut workouts = Vec::with_capacity(records.len());

        for record in records {
            if seen.contains(&record.id) {
                tracing::warn!(id = %record.id, "Skipping duplicate workout id");
                continue;
            }
            match Workout::try_from(record) {
                Ok(workout) => {
                    seen.insert(workout.id.clone());
                    workouts.push(workout);
                }
                Err(e) => tracing::warn!(error = %e, "Skipping unrestorable workout"),
            }
        }

        self.last_id = workouts
            .iter()
            .filter_map(|w| w.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        self.workouts = workouts;
        tracing::info!(count = self.workouts.len(), "Workouts restored");
    }

    /// Forget every workout and remove the stored blob.
    pub fn clear(&mut self) -> std::result::Result<(), PersistenceError> {
        self.workouts.clear();
        tracing::info!("All workouts cleared");
        self.repository.clear()
    }

    /// Bump the interaction counter of a workout. Not saved.
    pub(crate) fn record_interaction(&mut self, id: &str) -> Result<&Workout> {
        let workout = self
            .workouts
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        workout.record_interaction();
        Ok(&*workout)
    }

    /// Ids come from the creation time in milliseconds, bumped past any id
    /// already issued so two workouts in the same millisecond stay distinct.
    fn next_id(&mut self, millis: i64) -> String {
        let candidate = u64::try_from(millis).unwrap_or(0);
        let id = candidate.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id.to_string()
    }

    fn persist(&mut self) -> Option<PersistenceError> {
        match self.repository.save(&self.workouts) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save workouts");
                Some(e)
            }
        }
    }
}

fn validate(input: &NewWorkout) -> std::result::Result<(), ValidationError> {
    let coords = input.coordinates;
    finite("latitude", coords.latitude)?;
    finite("longitude", coords.longitude)?;
    if !(-90.0..=90.0).contains(&coords.latitude) {
        return Err(ValidationError::OutOfRange("latitude"));
    }
    if !(-180.0..=180.0).contains(&coords.longitude) {
        return Err(ValidationError::OutOfRange("longitude"));
    }

    positive("distance", input.distance_km)?;
    positive("duration", input.duration_min)?;

    match input.variant {
        VariantInput::Running { cadence_spm } => {
            positive("cadence", cadence_spm)?;
            if cadence_spm.fract() != 0.0 {
                return Err(ValidationError::NotInteger("cadence"));
            }
            if cadence_spm > f64::from(u32::MAX) {
                return Err(ValidationError::OutOfRange("cadence"));
            }
        }
        VariantInput::Cycling { elevation_gain_m } => {
            finite("elevation", elevation_gain_m)?;
            if elevation_gain_m < 0.0 {
                return Err(ValidationError::Negative("elevation"));
            }
        }
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> std::result::Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite(field))
    }
}

fn positive(field: &'static str, value: f64) -> std::result::Result<(), ValidationError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(field))
    }
}
