// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API tests against an in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn run_form() -> Value {
    json!({
        "type": "running",
        "lat": 41.39,
        "lng": 2.16,
        "distance": 5,
        "duration": 30,
        "cadence": 178
    })
}

fn ride_form() -> Value {
    json!({
        "type": "cycling",
        "lat": 41.40,
        "lng": 2.17,
        "distance": 20,
        "duration": 60,
        "elevation": 500
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["workouts"], 0);
    assert_eq!(json["map_ready"], true);
}

#[tokio::test]
async fn test_create_returns_marker_and_row_effects() {
    let (app, state) = common::create_test_app();

    let (status, json) = send(&app, "POST", "/api/workouts", Some(run_form())).await;

    assert_eq!(status, StatusCode::CREATED);
    let effects = json["effects"].as_array().unwrap();
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0]["effect"], "render_marker");
    assert_eq!(effects[0]["popup_class"], "running-popup");
    assert_eq!(effects[0]["description"], "Running on April 14");
    assert_eq!(effects[1]["effect"], "render_row");
    assert_eq!(effects[1]["metric_value"], 6.0);
    assert_eq!(effects[1]["metric_display"], "6.0");
    assert_eq!(effects[1]["extra_value"], 178.0);

    assert_eq!(state.store.lock().await.len(), 1);
}

#[tokio::test]
async fn test_create_invalid_is_bad_request_and_store_unchanged() {
    let (app, state) = common::create_test_app();
    let mut form = ride_form();
    form["distance"] = json!(-1);

    let (status, json) = send(&app, "POST", "/api/workouts", Some(form)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert_eq!(json["field"], "distance");
    assert!(state.store.lock().await.is_empty());
}

#[tokio::test]
async fn test_create_missing_cadence_is_bad_request() {
    let (app, _state) = common::create_test_app();
    let mut form = run_form();
    form.as_object_mut().unwrap().remove("cadence");

    let (status, json) = send(&app, "POST", "/api/workouts", Some(form)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["field"], "cadence");
}

#[tokio::test]
async fn test_blank_or_missing_distance_names_field() {
    let (app, state) = common::create_test_app();

    let mut blank = run_form();
    blank["distance"] = json!("");
    let mut missing = run_form();
    missing.as_object_mut().unwrap().remove("distance");
    let mut null = ride_form();
    null["distance"] = Value::Null;

    for form in [blank, missing, null] {
        let (status, json) = send(&app, "POST", "/api/workouts", Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["field"], "distance");
    }
    assert!(state.store.lock().await.is_empty());
}

#[tokio::test]
async fn test_unparseable_body_is_json_bad_request() {
    let (app, _state) = common::create_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/workouts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"type":"running","lat":41.39,"lng":2.16,"distance":1e400,"duration":30,"cadence":178}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_list_in_insertion_order() {
    let (app, _state) = common::create_test_app();
    send(&app, "POST", "/api/workouts", Some(run_form())).await;
    send(&app, "POST", "/api/workouts", Some(ride_form())).await;

    let (status, json) = send(&app, "GET", "/api/workouts", None).await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["kind"], "running");
    assert_eq!(rows[1]["kind"], "cycling");
    assert_eq!(rows[1]["metric_unit"], "km/h");
    assert_eq!(rows[1]["extra_field"], "elevation");
}

#[tokio::test]
async fn test_get_and_delete_by_id() {
    let (app, _state) = common::create_test_app();
    send(&app, "POST", "/api/workouts", Some(run_form())).await;
    let (_, created) = send(&app, "POST", "/api/workouts", Some(ride_form())).await;
    let id = created["effects"][1]["id"].as_str().unwrap().to_string();

    let (status, row) = send(&app, "GET", &format!("/api/workouts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["kind"], "cycling");

    let (status, json) = send(&app, "DELETE", &format!("/api/workouts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["effects"][0], json!({"effect": "remove_row", "id": id}));

    let (status, json) = send(&app, "DELETE", &format!("/api/workouts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");

    let (_, rows) = send(&app, "GET", "/api/workouts", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["kind"], "running");
}

#[tokio::test]
async fn test_focus_centers_map_and_counts() {
    let (app, _state) = common::create_test_app();
    let (_, created) = send(&app, "POST", "/api/workouts", Some(ride_form())).await;
    let id = created["effects"][0]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/workouts/{}/focus", id);
    send(&app, "POST", &uri, None).await;
    let (status, json) = send(&app, "POST", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    let center = &json["effects"][0];
    assert_eq!(center["effect"], "center_map");
    assert_eq!(center["zoom"], 15);
    assert_eq!(center["animate"], true);
    assert_eq!(center["coordinates"]["latitude"], 41.40);

    let (_, row) = send(&app, "GET", &format!("/api/workouts/{}", id), None).await;
    assert_eq!(row["interaction_count"], 2);
}

#[tokio::test]
async fn test_focus_unknown_is_not_found() {
    let (app, _state) = common::create_test_app();
    let (status, _) = send(&app, "POST", "/api/workouts/nope/focus", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlong_id_is_bad_request() {
    let (app, _state) = common::create_test_app();
    let uri = format!("/api/workouts/{}", "9".repeat(65));
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let (app, state) = common::create_test_app();
    send(&app, "POST", "/api/workouts", Some(run_form())).await;

    let (status, json) = send(&app, "DELETE", "/api/workouts", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["effects"][0]["effect"], "clear_all");
    let store = state.store.lock().await;
    assert!(store.is_empty());
    assert!(store.repository().load().unwrap().is_empty());
}

#[tokio::test]
async fn test_map_lists_markers() {
    let (app, _state) = common::create_test_app();
    send(&app, "POST", "/api/workouts", Some(run_form())).await;

    let (status, json) = send(&app, "GET", "/api/map", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["zoom"], 15);
    assert_eq!(json["center"]["latitude"], 41.39);
    assert_eq!(json["markers"][0]["glyph"], "🏃‍♂️");
}

#[tokio::test]
async fn test_map_without_location_is_unavailable() {
    let (app, _state) = common::create_test_app_without_location();

    let (status, json) = send(&app, "GET", "/api/map", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "location_unavailable");

    // Workouts still work without a map.
    let (status, _) = send(&app, "POST", "/api/workouts", Some(run_form())).await;
    assert_eq!(status, StatusCode::CREATED);
}
