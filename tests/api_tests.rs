// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP API tests against the in-memory app.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{exercise_log, test_profile, working_set, OWNER};

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state, _db) = common::create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_schedule_weekly() {
    let (app, _state, db) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            &format!("/api/users/{}/schedule/weekly", OWNER),
            json!({
                "workouts": ["upper", "rest", "lower", "rest", "upper", "rest", "rest"],
                "weeks": 1
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let assignments = body["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 3);

    let lower = assignments
        .iter()
        .find(|a| a["workout_id"] == "lower")
        .unwrap();
    assert_eq!(lower["dates"], json!(["2024-03-06"]));

    assert_eq!(db.assignments_for(OWNER).len(), 3);
}

#[tokio::test]
async fn test_schedule_weekly_wrong_length() {
    let (app, _state, db) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            &format!("/api/users/{}/schedule/weekly", OWNER),
            json!({ "workouts": ["a", "b", "c"], "weeks": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_input");
    assert!(db.assignments_for(OWNER).is_empty());
}

#[tokio::test]
async fn test_schedule_cyclic_zero_weeks() {
    let (app, _state, db) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            &format!("/api/users/{}/schedule/cyclic", OWNER),
            json!({ "workouts": ["a"], "weeks": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(db.assignments_for(OWNER).is_empty());
}

#[tokio::test]
async fn test_schedule_cyclic_too_many_weeks() {
    let (app, _state, db) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            &format!("/api/users/{}/schedule/cyclic", OWNER),
            json!({ "workouts": ["a"], "weeks": i64::MAX }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(db.assignments_for(OWNER).is_empty());
}

#[tokio::test]
async fn test_schedule_cyclic() {
    let (app, _state, _db) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            &format!("/api/users/{}/schedule/cyclic", OWNER),
            json!({ "workouts": ["push", "pull"], "weeks": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let push = body["assignments"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["workout_id"] == "push")
        .unwrap()
        .clone();
    assert_eq!(
        push["dates"],
        json!(["2024-03-06", "2024-03-08", "2024-03-10", "2024-03-12"])
    );
}

#[tokio::test]
async fn test_dashboard() {
    let (app, _state, db) = common::create_test_app();
    db.insert_log(exercise_log(
        "l1",
        "squat",
        "legs",
        "2024-03-06T08:00:00Z",
        vec![working_set(100.0, 5)],
    ));

    let response = app
        .oneshot(get(&format!(
            "/api/users/{}/dashboard?start=2024-03-01&end=2024-03-06",
            OWNER
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["frequency_graph"]["points"].as_array().unwrap().len(), 30);
    assert_eq!(body["analysis"]["current_streak"], 1);
    assert_eq!(body["analysis"]["most_active_day"], "Wednesday");
    assert_eq!(body["analysis"]["most_active_time"], "Morning");
}

#[tokio::test]
async fn test_dashboard_requires_dates() {
    let (app, _state, _db) = common::create_test_app();

    let response = app
        .oneshot(get(&format!("/api/users/{}/dashboard?start=2024-03-01", OWNER)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_dashboard_inverted_range() {
    let (app, _state, _db) = common::create_test_app();

    let response = app
        .oneshot(get(&format!(
            "/api/users/{}/dashboard?start=2024-03-06&end=2024-03-01",
            OWNER
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rep_max_endpoint() {
    let (app, _state, db) = common::create_test_app();
    db.insert_log(exercise_log(
        "l1",
        "squat",
        "legs",
        "2024-03-06T08:00:00Z",
        vec![working_set(100.0, 10)],
    ));

    let response = app
        .clone()
        .oneshot(get(&format!("/api/users/{}/exercises/squat/rep-max", OWNER)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["one_rep_max"], 133.37);

    let response = app
        .oneshot(get(&format!(
            "/api/users/{}/exercises/deadlift/rep-max?latest=true",
            OWNER
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_strength_standards_endpoint() {
    let (app, _state, db) = common::create_test_app();
    db.insert_profile(test_profile());
    db.insert_log(exercise_log(
        "l1",
        "squat",
        "legs",
        "2024-03-06T08:00:00Z",
        vec![working_set(100.0, 10)],
    ));

    let response = app
        .oneshot(get(&format!("/api/users/{}/strength-standards", OWNER)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["per_exercise"][0]["tier"], "elite");
    assert_eq!(body["per_muscle_group"][0]["muscle_group"], "legs");
}

#[tokio::test]
async fn test_nutrition_endpoint() {
    let (app, _state, db) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/users/{}/nutrition", OWNER)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    db.insert_profile(test_profile());
    let response = app
        .oneshot(get(&format!("/api/users/{}/nutrition", OWNER)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["calories_per_day"], 2759.0);
}

#[tokio::test]
async fn test_one_rep_max_calculator() {
    let (app, _state, _db) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/calculators/one-rep-max?weight=100&reps=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["one_rep_max"], 133.37);

    let response = app
        .clone()
        .oneshot(get("/api/calculators/one-rep-max?weight=100&reps=37"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get("/api/calculators/one-rep-max?reps=5&assist=20"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get(
            "/api/calculators/one-rep-max?reps=5&assist=20&body_weight=80",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["one_rep_max"], 67.51);
}

#[tokio::test]
async fn test_cors_allows_localhost() {
    let (app, _state, _db) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
}
