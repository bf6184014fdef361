// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle tests: login failure, logout, forced logout.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use fitdesk::models::Role;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_failed_login_leaves_store_empty() {
    // The offline core client rejects the login call; nothing may be stored.
    let (app, state) = common::create_test_app();

    let body = serde_json::json!({
        "email": "member@example.com",
        "password": "hunter22",
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let (app, state) = common::create_test_app();

    let body = serde_json::json!({
        "email": "not-an-email",
        "password": "hunter22",
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    // Validation fails before any upstream call
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_logout_invalidates_the_retained_jwt() {
    let (app, state) = common::create_test_app();
    let (session_id, jwt) = common::seed_session(&state, 5, Role::Member);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(state.sessions.get(session_id).is_none());

    // The JWT itself is still validly signed but must no longer work
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_failure_forces_logout() {
    // The offline core client fails the refresh call; the session must be
    // gone afterwards and the response must ask for re-authentication.
    let (app, state) = common::create_test_app();
    let (session_id, jwt) = common::seed_session(&state, 5, Role::Member);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(state.sessions.get(session_id).is_none());
}

#[tokio::test]
async fn test_me_surfaces_upstream_failure_without_dropping_session() {
    // A non-auth upstream failure (offline) is a 502, not a forced logout.
    let (app, state) = common::create_test_app();
    let (session_id, jwt) = common::seed_session(&state, 5, Role::Member);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(state.sessions.get(session_id).is_some());
}
