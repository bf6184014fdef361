// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gateway JWT tests: signing, claims, expiry, and wrong-key rejection.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use fitdesk::middleware::auth::{create_jwt, Claims};
use fitdesk::models::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use uuid::Uuid;

mod common;

#[test]
fn test_create_jwt_round_trip() {
    let signing_key = b"test_jwt_key_32_bytes_minimum!!";
    let session_id = Uuid::new_v4();

    let jwt = create_jwt(session_id, signing_key).unwrap();

    let decoded = decode::<Claims>(
        &jwt,
        &DecodingKey::from_secret(signing_key),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap();

    assert_eq!(decoded.claims.sub, session_id.to_string());
    assert!(decoded.claims.exp > decoded.claims.iat);
}

#[tokio::test]
async fn test_expired_jwt_is_rejected() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = common::seed_session(&state, 1, Role::Member);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: session_id.to_string(),
        iat: now - 7200,
        exp: now - 3600, // Expired an hour ago
    };
    let jwt = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&state.config.jwt_signing_key),
    )
    .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/classes")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_jwt_signed_with_wrong_key_is_rejected() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = common::seed_session(&state, 1, Role::Member);

    let jwt = create_jwt(session_id, b"completely_different_key_here!!").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/classes")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_jwt_with_garbage_subject_is_rejected() {
    let (app, state) = common::create_test_app();
    common::seed_session(&state, 1, Role::Member);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: "not-a-uuid".to_string(),
        iat: now,
        exp: now + 3600,
    };
    let jwt = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&state.config.jwt_signing_key),
    )
    .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/classes")
                .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
