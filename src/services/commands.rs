// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User commands and the effects they produce for the front end.
//!
//! Form submits, list clicks and delete buttons arrive as [`Command`]s. Each
//! one runs to completion against the store and returns the [`Effect`]s the
//! map and list should apply. Render effects are built from the stored
//! workout, not from the submitted form values.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::KeyValueStorage;
use crate::error::Result;
use crate::models::{Marker, NavigationRequest, NewWorkout, WorkoutRow};
use crate::services::navigation::Navigator;
use crate::services::persistence::PersistenceError;
use crate::services::store::WorkoutStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create(NewWorkout),
    Delete { id: String },
    Focus { id: String },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Effect {
    RenderMarker(Marker),
    RenderRow(WorkoutRow),
    RemoveRow { id: String },
    CenterMap(NavigationRequest),
    ClearAll,
    PersistenceWarning { message: String },
}

impl Effect {
    fn warning(err: &PersistenceError) -> Self {
        Effect::PersistenceWarning {
            message: err.to_string(),
        }
    }
}

/// Apply one command to the store.
pub fn dispatch<S: KeyValueStorage>(
    store: &mut WorkoutStore<S>,
    navigator: &Navigator,
    command: Command,
) -> Result<Vec<Effect>> {
    let mut effects = Vec::new();

    match command {
        Command::Create(input) => {
            let created = store.create(input)?;
            let stored = store.find_by_id(created.value.id())?;
            effects.push(Effect::RenderMarker(Marker::from(stored)));
            effects.push(Effect::RenderRow(WorkoutRow::from(stored)));
            effects.extend(created.warning.as_ref().map(Effect::warning));
        }
        Command::Delete { id } => {
            let deleted = store.delete_by_id(&id)?;
            effects.push(Effect::RemoveRow { id });
            effects.extend(deleted.warning.as_ref().map(Effect::warning));
        }
        Command::Focus { id } => {
            effects.push(Effect::CenterMap(navigator.resolve(store, &id)?));
        }
        Command::Reset => {
            let result = store.clear();
            effects.push(Effect::ClearAll);
            if let Err(e) = &result {
                tracing::warn!(error = %e, "Failed to remove stored workouts");
                effects.push(Effect::warning(e));
            }
        }
    }

    Ok(effects)
}
