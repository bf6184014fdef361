// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod auth;
pub mod bookings;
pub mod checkout;
pub mod classes;
pub mod dashboard;
pub mod feedback;
pub mod members;
pub mod plans;

use crate::error::{AppError, Result};
use crate::filter::MAX_SEARCH_LEN;
use crate::middleware::auth::{require_auth, CurrentUser};
use crate::models::Role;
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(auth::public_routes());

    // Protected routes (live session required)
    let protected_routes = Router::new()
        .merge(auth::session_routes())
        .merge(members::routes())
        .merge(classes::routes())
        .merge(plans::routes())
        .merge(bookings::routes())
        .merge(feedback::routes())
        .merge(checkout::routes())
        .merge(dashboard::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

// ─── Shared handler helpers ──────────────────────────────────────

/// Read the session's core access token at call time.
///
/// The token lives only in the session store; if the entry is gone the
/// session was logged out between middleware and handler.
pub(crate) fn access_token(state: &AppState, session_id: Uuid) -> Result<String> {
    state
        .sessions
        .access_token(session_id)
        .ok_or(AppError::Unauthorized)
}

/// Map an upstream error, forcing logout when the core rejected our token.
pub(crate) fn map_upstream(state: &AppState, session_id: Uuid, err: AppError) -> AppError {
    if err.is_core_auth_error() {
        tracing::info!(session_id = %session_id, "Core API rejected token, clearing session");
        state.sessions.remove(session_id);
        return AppError::InvalidToken;
    }
    err
}

/// Query parameters shared by all list screens.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    /// Case-insensitive substring search
    #[serde(default)]
    pub search: Option<String>,
}

impl ListQuery {
    /// Validated search term; empty string means no filtering.
    pub fn term(&self) -> Result<&str> {
        let term = self.search.as_deref().unwrap_or("");
        // Characters, not bytes: a multibyte term must get the full budget
        if term.chars().count() > MAX_SEARCH_LEN {
            return Err(AppError::BadRequest(format!(
                "Search term must be at most {} characters",
                MAX_SEARCH_LEN
            )));
        }
        Ok(term)
    }
}

/// Body required by every delete route: the confirmation step.
#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmBody {
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmBody {
    /// Reject unconfirmed deletes before any upstream call fires.
    pub fn check(&self) -> Result<()> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::BadRequest(
                "Deletion requires explicit confirmation".to_string(),
            ))
        }
    }
}

/// Admin-only boundary.
pub(crate) fn require_admin(user: &CurrentUser) -> Result<()> {
    match user.user.role {
        Role::Admin => Ok(()),
        Role::Staff | Role::Member => {
            Err(AppError::Forbidden("admin access required".to_string()))
        }
    }
}

/// Front-desk boundary (admin or staff).
pub(crate) fn require_staff(user: &CurrentUser) -> Result<()> {
    match user.user.role {
        Role::Admin | Role::Staff => Ok(()),
        Role::Member => Err(AppError::Forbidden("staff access required".to_string())),
    }
}

/// Member-only boundary (checkout, feedback submission).
pub(crate) fn require_member(user: &CurrentUser) -> Result<()> {
    match user.user.role {
        Role::Member => Ok(()),
        Role::Admin | Role::Staff => {
            Err(AppError::Forbidden("member account required".to_string()))
        }
    }
}
