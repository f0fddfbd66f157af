// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Selecting a workout from the list and centering the map on it.

use crate::db::KeyValueStorage;
use crate::error::Result;
use crate::models::NavigationRequest;
use crate::services::store::WorkoutStore;

/// Zoom the map uses when showing a single workout.
pub const DEFAULT_ZOOM: u8 = 15;

/// Pan animation length for focus requests.
const PAN_DURATION_SECS: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    zoom: u8,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}

impl Navigator {
    pub fn new(zoom: u8) -> Self {
        Self { zoom }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Resolve a workout for focusing and count the interaction.
    pub fn resolve<S: KeyValueStorage>(
        &self,
        store: &mut WorkoutStore<S>,
        id: &str,
    ) -> Result<NavigationRequest> {
        let workout = store.record_interaction(id)?;
        tracing::debug!(
            id,
            interactions = workout.interaction_count(),
            "Focusing workout"
        );

        Ok(NavigationRequest {
            id: workout.id().to_string(),
            coordinates: workout.coordinates(),
            zoom: self.zoom,
            animate: true,
            pan_duration_secs: PAN_DURATION_SECS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;
    use crate::error::AppError;
    use crate::models::{Coordinates, NewWorkout, WorkoutKind};
    use crate::services::persistence::WorkoutRepository;

    #[test]
    fn test_resolve_returns_coordinates_and_counts() {
        let mut store = WorkoutStore::new(WorkoutRepository::new(MemoryStorage::new(), "w"));
        let id = store
            .create(NewWorkout::new(
                WorkoutKind::Cycling,
                Coordinates::new(41.39, 2.16),
                20.0,
                60.0,
                500.0,
            ))
            .unwrap()
            .value
            .id()
            .to_string();

        let navigator = Navigator::default();
        let request = navigator.resolve(&mut store, &id).unwrap();
        navigator.resolve(&mut store, &id).unwrap();

        assert_eq!(request.coordinates, Coordinates::new(41.39, 2.16));
        assert_eq!(request.zoom, 15);
        assert!(request.animate);
        assert_eq!(store.find_by_id(&id).unwrap().interaction_count(), 2);
    }

    #[test]
    fn test_resolve_unknown_id_is_not_found() {
        let mut store = WorkoutStore::new(WorkoutRepository::new(MemoryStorage::new(), "w"));
        let err = Navigator::new(12).resolve(&mut store, "missing").unwrap_err();
        assert!(matches!(err, AppError::NotFound(id) if id == "missing"));
    }
}
