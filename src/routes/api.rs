// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API routes used by the map, form and list front end.

use crate::error::{AppError, Result, ValidationError};
use crate::models::{Coordinates, MapView, Marker, NewWorkout, WorkoutKind, WorkoutRow};
use crate::services::{dispatch, Command, Effect};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest workout id accepted in a path.
const MAX_ID_LENGTH: usize = 64;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/map", get(get_map))
        .route(
            "/api/workouts",
            get(list_workouts)
                .post(create_workout)
                .delete(reset_workouts),
        )
        .route(
            "/api/workouts/{id}",
            get(get_workout).delete(delete_workout),
        )
        .route("/api/workouts/{id}/focus", post(focus_workout))
}

// ─── Map ─────────────────────────────────────────────────────

/// Initial map view plus a marker for every stored workout.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapResponse {
    #[serde(flatten)]
    pub view: MapView,
    pub markers: Vec<Marker>,
}

async fn get_map(State(state): State<Arc<AppState>>) -> Result<Json<MapResponse>> {
    let view = state.map_view.ok_or_else(|| {
        AppError::LocationUnavailable("position could not be determined at startup".to_string())
    })?;

    let store = state.store.lock().await;
    let markers = store.list().iter().map(Marker::from).collect();
    Ok(Json(MapResponse { view, markers }))
}

// ─── Workouts ────────────────────────────────────────────────

/// Form submission: the clicked map position plus the entered values.
///
/// Fields stay loosely typed so missing, empty or non-numeric entries are
/// reported as validation errors naming the field.
#[derive(Debug, Deserialize)]
pub struct NewWorkoutRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub lat: Option<Value>,
    pub lng: Option<Value>,
    pub distance: Option<Value>,
    pub duration: Option<Value>,
    pub cadence: Option<Value>,
    pub elevation: Option<Value>,
}

impl NewWorkoutRequest {
    /// Pick the variant field named by the selected type.
    ///
    /// The field for the other type is ignored, as the form hides it.
    pub fn into_new_workout(self) -> std::result::Result<NewWorkout, ValidationError> {
        let kind: WorkoutKind = self
            .kind
            .ok_or(ValidationError::MissingField("type"))?
            .parse()?;
        let variant_field = match kind {
            WorkoutKind::Running => number("cadence", self.cadence)?,
            WorkoutKind::Cycling => number("elevation", self.elevation)?,
        };

        Ok(NewWorkout::new(
            kind,
            Coordinates::new(
                number("latitude", self.lat)?,
                number("longitude", self.lng)?,
            ),
            number("distance", self.distance)?,
            number("duration", self.duration)?,
            variant_field,
        ))
    }
}

/// Read a form value as a number, accepting numeric strings.
fn number(
    field: &'static str,
    value: Option<Value>,
) -> std::result::Result<f64, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::Number(n)) => n.as_f64().ok_or(ValidationError::NonFinite(field)),
        Some(Value::String(text)) if text.trim().is_empty() => {
            Err(ValidationError::MissingField(field))
        }
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::NonFinite(field)),
        Some(_) => Err(ValidationError::NonFinite(field)),
    }
}

/// Effects the front end should apply after a command.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CommandResponse {
    pub effects: Vec<Effect>,
}

async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutRow>> {
    let store = state.store.lock().await;
    Json(store.list().iter().map(WorkoutRow::from).collect())
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutRow>> {
    check_id(&id)?;
    let store = state.store.lock().await;
    Ok(Json(WorkoutRow::from(store.find_by_id(&id)?)))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    request: std::result::Result<Json<NewWorkoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommandResponse>)> {
    let Json(request) = request.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let input = request.into_new_workout()?;
    let effects = run(&state, Command::Create(input)).await?;
    Ok((StatusCode::CREATED, Json(CommandResponse { effects })))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>> {
    check_id(&id)?;
    let effects = run(&state, Command::Delete { id }).await?;
    Ok(Json(CommandResponse { effects }))
}

async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>> {
    check_id(&id)?;
    let effects = run(&state, Command::Focus { id }).await?;
    Ok(Json(CommandResponse { effects }))
}

async fn reset_workouts(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>> {
    tracing::info!("User-initiated reset of all workouts");
    let effects = run(&state, Command::Reset).await?;
    Ok(Json(CommandResponse { effects }))
}

async fn run(state: &AppState, command: Command) -> Result<Vec<Effect>> {
    let mut store = state.store.lock().await;
    dispatch(&mut *store, &state.navigator, command)
}

fn check_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > MAX_ID_LENGTH {
        return Err(AppError::BadRequest(format!(
            "workout id must be 1-{} characters",
            MAX_ID_LENGTH
        )));
    }
    Ok(())
}
