// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use serde_json::Value;
use std::sync::Arc;
use workout_tracker::config::Config;
use workout_tracker::db::MemorySlotStorage;
use workout_tracker::routes::create_router;
use workout_tracker::services::WorkoutStore;
use workout_tracker::AppState;

/// Create a test app over in-memory storage.
/// Returns the router, the shared state, and a handle on the storage.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemorySlotStorage) {
    create_test_app_with(MemorySlotStorage::new())
}

/// Create a test app that restores from existing storage, like a restart.
#[allow(dead_code)]
pub fn create_test_app_with(
    storage: MemorySlotStorage,
) -> (axum::Router, Arc<AppState>, MemorySlotStorage) {
    let config = Config::test_default();
    let store = WorkoutStore::open(Box::new(storage.clone()), config.storage_slot.clone());
    let state = Arc::new(AppState::new(config, store));

    (create_router(state.clone()), state, storage)
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a body-less request.
#[allow(dead_code)]
pub fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Response body should be JSON")
}

/// Form body for a running workout.
#[allow(dead_code)]
pub fn running_form(distance_km: Value) -> Value {
    serde_json::json!({
        "kind": "running",
        "lat": 38.72,
        "lng": -9.14,
        "distance_km": distance_km,
        "duration_min": 50,
        "cadence_spm": 180
    })
}

/// Form body for a cycling workout.
#[allow(dead_code)]
pub fn cycling_form() -> Value {
    serde_json::json!({
        "kind": "cycling",
        "lat": 39.0,
        "lng": -12.0,
        "distance_km": 20,
        "duration_min": 60,
        "elevation_gain_m": 100
    })
}
