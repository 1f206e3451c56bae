// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API routes.

use crate::error::{AppError, Result};
use crate::models::view::markers_geojson;
use crate::models::{Coords, ListEntryView, MapView, MarkerView, NewWorkout, Workout, WorkoutKind};
use crate::services::RenderBatch;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest id accepted in a path. New ids are 36-character UUIDs.
const MAX_ID_LEN: usize = 64;

/// Workout routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts)
                .post(create_workout)
                .delete(clear_workouts),
        )
        .route("/api/workouts/markers", get(get_markers))
        .route("/api/workouts/{id}", get(get_workout))
        .route("/api/workouts/{id}/activate", post(activate_workout))
}

fn check_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > MAX_ID_LEN {
        return Err(AppError::BadRequest(format!(
            "Workout id must be 1-{} characters",
            MAX_ID_LEN
        )));
    }
    Ok(())
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Workout {} not found", id))
}

// ─── Startup ─────────────────────────────────────────────────

/// List entries for every stored workout.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListResponse {
    pub list_entries: Vec<ListEntryView>,
}

/// Replay the list on page load. Markers wait for the map (see `get_markers`).
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<ListResponse> {
    let store = state.store.lock().await;
    let mut batch = RenderBatch::default();
    store.replay_list(&mut batch);

    Json(ListResponse {
        list_entries: batch.list_entries,
    })
}

/// Markers for every stored workout, as GeoJSON, once the map is ready.
async fn get_markers(State(state): State<Arc<AppState>>) -> Json<geojson::FeatureCollection> {
    let store = state.store.lock().await;
    let mut batch = RenderBatch::default();
    store.replay_markers(&mut batch);

    Json(markers_geojson(&batch.markers))
}

// ─── Create ──────────────────────────────────────────────────

/// Form submission for a new workout.
///
/// Numeric fields are optional so an empty form field reaches validation
/// (and gets the user-facing message) instead of failing to parse.
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub kind: WorkoutKind,
    pub lat: f64,
    pub lng: f64,
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    pub cadence_spm: Option<f64>,
    pub elevation_gain_m: Option<f64>,
}

impl CreateWorkoutRequest {
    fn into_new_workout(self) -> NewWorkout {
        let extra = match self.kind {
            WorkoutKind::Running => self.cadence_spm,
            WorkoutKind::Cycling => self.elevation_gain_m,
        };
        NewWorkout {
            kind: self.kind,
            coords: Coords::new(self.lat, self.lng),
            distance_km: self.distance_km.unwrap_or(f64::NAN),
            duration_min: self.duration_min.unwrap_or(f64::NAN),
            extra: extra.unwrap_or(f64::NAN),
        }
    }
}

/// The new workout plus what to render for it.
#[derive(Serialize, Deserialize)]
pub struct CreateWorkoutResponse {
    pub workout: Workout,
    pub marker: MarkerView,
    pub list_entry: ListEntryView,
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<CreateWorkoutResponse>)> {
    let input = request.into_new_workout();

    let mut store = state.store.lock().await;
    let mut batch = RenderBatch::default();
    let workout = store.add_workout(input, &mut batch)?.clone();

    let (Some(marker), Some(list_entry)) = (batch.markers.pop(), batch.list_entries.pop()) else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "Workout {} was stored but not rendered",
            workout.id
        )));
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateWorkoutResponse {
            workout,
            marker,
            list_entry,
        }),
    ))
}

// ─── Lookup ──────────────────────────────────────────────────

/// A workout and where to move the map for it.
#[derive(Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub workout: Workout,
    pub view: MapView,
}

/// Resolve a clicked list row to its workout and map position.
async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutResponse>> {
    check_id(&id)?;

    let store = state.store.lock().await;
    let mut batch = RenderBatch::default();
    let workout = store
        .focus(&id, state.config.map_zoom_level, &mut batch)
        .ok_or_else(|| not_found(&id))?
        .clone();
    let view = batch.view.ok_or_else(|| not_found(&id))?;

    Ok(Json(WorkoutResponse { workout, view }))
}

/// Interaction count after activation.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivateResponse {
    pub id: String,
    pub interaction_count: u32,
}

async fn activate_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActivateResponse>> {
    check_id(&id)?;

    let mut store = state.store.lock().await;
    let interaction_count = store.activate(&id)?.ok_or_else(|| not_found(&id))?;

    Ok(Json(ActivateResponse {
        id,
        interaction_count,
    }))
}

// ─── Reset ───────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
}

/// Delete every workout. The front end reloads afterwards.
async fn clear_workouts(State(state): State<Arc<AppState>>) -> Result<Json<ClearResponse>> {
    let mut store = state.store.lock().await;
    store.clear_all()?;

    Ok(Json(ClearResponse {
        success: true,
        message: "All workouts deleted.".to_string(),
    }))
}
