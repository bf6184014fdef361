// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitdesk::config::Config;
use fitdesk::middleware::auth::create_jwt;
use fitdesk::models::{Role, TokenPair, User};
use fitdesk::routes::create_router;
use fitdesk::services::{CheckoutService, CoreClient, SessionStore};
use fitdesk::AppState;
use std::sync::Arc;
use uuid::Uuid;

/// Create a test app with an offline mock core client.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let core = CoreClient::new_mock();
    let sessions = SessionStore::new();
    let checkout = CheckoutService::new();

    let state = Arc::new(AppState {
        config,
        sessions,
        core,
        checkout,
    });

    (create_router(state.clone()), state)
}

/// A user profile for seeding sessions directly.
#[allow(dead_code)]
pub fn test_user(id: u64, role: Role) -> User {
    User {
        id,
        email: format!("user{}@example.com", id),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role,
        phone_number: None,
        address: None,
        profile_picture_url: None,
        join_date: None,
    }
}

/// Seed a logged-in session without touching the network.
/// Returns the session id and a gateway JWT accepted by the middleware.
#[allow(dead_code)]
pub fn seed_session(state: &AppState, user_id: u64, role: Role) -> (Uuid, String) {
    let token = TokenPair {
        access: "core-access-token".to_string(),
        refresh: "core-refresh-token".to_string(),
    };
    let session_id = state.sessions.insert(token, test_user(user_id, role));

    let jwt = create_jwt(session_id, &state.config.jwt_signing_key).expect("JWT creation");
    (session_id, jwt)
}
