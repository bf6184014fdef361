// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role gating tests: each guarded boundary matches the closed role enum.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use fitdesk::models::Role;
use tower::ServiceExt;

mod common;

async fn request_as(
    app: axum::Router,
    jwt: &str,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> StatusCode {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

#[tokio::test]
async fn test_member_cannot_list_members() {
    let (app, state) = common::create_test_app();
    let (_, jwt) = common::seed_session(&state, 1, Role::Member);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/members")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_member_cannot_create_class() {
    let (app, state) = common::create_test_app();
    let (_, jwt) = common::seed_session(&state, 1, Role::Member);

    let body = serde_json::json!({
        "title": "HIIT",
        "instructor": 2,
        "capacity": 20,
        "price_cents": 1500,
        "duration_minutes": 45,
        "start_datetime": "2026-09-01T18:00:00Z",
        "end_datetime": "2026-09-01T18:45:00Z",
    });
    let status = request_as(app, &jwt, "POST", "/api/classes", body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_staff_cannot_create_plan() {
    // Plans are admin-only; staff stops at the boundary.
    let (app, state) = common::create_test_app();
    let (_, jwt) = common::seed_session(&state, 1, Role::Staff);

    let body = serde_json::json!({
        "name": "Monthly",
        "duration_days": 30,
        "price_cents": 4900,
    });
    let status = request_as(app, &jwt, "POST", "/api/plans", body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_passes_plan_boundary() {
    let (app, state) = common::create_test_app();
    let (_, jwt) = common::seed_session(&state, 1, Role::Admin);

    let body = serde_json::json!({
        "name": "Monthly",
        "duration_days": 30,
        "price_cents": 4900,
    });
    // Gating passes; the offline core then fails with 502
    let status = request_as(app, &jwt, "POST", "/api/plans", body).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_staff_cannot_run_checkout() {
    let (app, state) = common::create_test_app();
    let (_, jwt) = common::seed_session(&state, 1, Role::Staff);

    let body = serde_json::json!({ "class_id": 3 });
    let status = request_as(app, &jwt, "POST", "/api/checkout/class", body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_staff_cannot_submit_feedback() {
    let (app, state) = common::create_test_app();
    let (_, jwt) = common::seed_session(&state, 1, Role::Staff);

    let body = serde_json::json!({ "fitness_class": 3, "rating": 5 });
    let status = request_as(app, &jwt, "POST", "/api/feedback", body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_member_cannot_mark_attendance() {
    let (app, state) = common::create_test_app();
    let (_, jwt) = common::seed_session(&state, 1, Role::Member);

    let body = serde_json::json!({ "present": true });
    let status = request_as(app, &jwt, "POST", "/api/bookings/7/attendance", body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_member_reads_own_record_without_staff_role() {
    let (app, state) = common::create_test_app();
    let (_, jwt) = common::seed_session(&state, 9, Role::Member);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/members/9")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Own record: gating passes, offline core fails with 502 (not 403)
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
