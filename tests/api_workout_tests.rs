// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests of the workout lifecycle through the HTTP API.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_test_app, create_test_app_with, cycling_form, empty, json_body, post_json, running_form};

#[tokio::test]
async fn test_create_running_workout() {
    let (app, state, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/workouts", running_form(json!(10))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;

    let workout = &body["workout"];
    assert_eq!(workout["kind"], "running");
    assert_eq!(workout["pace_min_per_km"], 5.0);
    assert_eq!(workout["coords"], json!([38.72, -9.14]));
    assert!(workout["description"]
        .as_str()
        .unwrap()
        .starts_with("Running on "));

    let id = workout["id"].as_str().unwrap();
    assert_eq!(body["marker"]["id"], id);
    assert_eq!(body["marker"]["popup_class"], "running-popup");
    assert_eq!(body["list_entry"]["id"], id);
    assert_eq!(body["list_entry"]["metric_value"], "5.0");

    assert_eq!(state.store.lock().await.len(), 1);
}

#[tokio::test]
async fn test_create_cycling_workout() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/workouts", cycling_form()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["workout"]["speed_km_per_h"], 20.0);
    assert_eq!(body["list_entry"]["metric_unit"], "km/h");
    assert_eq!(body["list_entry"]["extra_unit"], "m");
}

#[tokio::test]
async fn test_startup_list_after_restart() {
    let (app, _, storage) = create_test_app();

    let first = json_body(
        app.clone()
            .oneshot(post_json("/api/workouts", running_form(json!(10))))
            .await
            .unwrap(),
    )
    .await;
    let second = json_body(
        app.oneshot(post_json("/api/workouts", cycling_form()))
            .await
            .unwrap(),
    )
    .await;

    // A fresh process over the same storage
    let (restarted, state, _) = create_test_app_with(storage);
    assert_eq!(state.store.lock().await.len(), 2);

    let response = restarted
        .oneshot(empty("GET", "/api/workouts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let entries = body["list_entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], first["workout"]["id"]);
    assert_eq!(entries[1]["id"], second["workout"]["id"]);
    assert_eq!(entries[1]["title"], second["workout"]["description"]);
}

#[tokio::test]
async fn test_markers_as_geojson() {
    let (app, _, _) = create_test_app();

    app.clone()
        .oneshot(post_json("/api/workouts", cycling_form()))
        .await
        .unwrap();

    let response = app
        .oneshot(empty("GET", "/api/workouts/markers"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["type"], "FeatureCollection");
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["geometry"]["coordinates"], json!([-12.0, 39.0]));
    assert_eq!(features[0]["properties"]["popup_class"], "cycling-popup");
}

#[tokio::test]
async fn test_lookup_moves_map() {
    let (app, _, _) = create_test_app();

    let created = json_body(
        app.clone()
            .oneshot(post_json("/api/workouts", running_form(json!(10))))
            .await
            .unwrap(),
    )
    .await;
    let id = created["workout"]["id"].as_str().unwrap();

    let response = app
        .oneshot(empty("GET", &format!("/api/workouts/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["workout"]["id"], id);
    assert_eq!(body["view"]["center"], json!([38.72, -9.14]));
    assert_eq!(body["view"]["zoom"], 13);
}

#[tokio::test]
async fn test_lookup_unknown_id() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(empty("GET", "/api/workouts/1720949400"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_activate_counts_and_persists() {
    let (app, _, storage) = create_test_app();

    let created = json_body(
        app.clone()
            .oneshot(post_json("/api/workouts", running_form(json!(10))))
            .await
            .unwrap(),
    )
    .await;
    let id = created["workout"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/workouts/{}/activate", id);

    for expected in 1..=2 {
        let response = app
            .clone()
            .oneshot(empty("POST", &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["interaction_count"], expected);
    }

    let (_, state, _) = create_test_app_with(storage);
    let store = state.store.lock().await;
    assert_eq!(store.find_by_id(&id).unwrap().interaction_count, 2);
}

#[tokio::test]
async fn test_clear_all() {
    let (app, state, storage) = create_test_app();

    app.clone()
        .oneshot(post_json("/api/workouts", running_form(json!(10))))
        .await
        .unwrap();

    let response = app
        .oneshot(empty("DELETE", "/api/workouts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);

    assert!(state.store.lock().await.is_empty());

    let (_, restarted, _) = create_test_app_with(storage);
    assert!(restarted.store.lock().await.is_empty());
}

#[tokio::test]
async fn test_storage_failure_returns_500() {
    let (app, state, storage) = create_test_app();
    storage.set_fail_writes(true);

    let response = app
        .oneshot(post_json("/api/workouts", running_form(json!(10))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "storage_error");
    assert!(state.store.lock().await.is_empty());
}
