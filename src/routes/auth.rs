// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, logout, token refresh, and current-user routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, CurrentUser, SESSION_COOKIE};
use crate::models::{User, UserUpdate};
use crate::routes::map_upstream;
use crate::AppState;

/// Routes reachable without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/login", post(login))
}

/// Routes that require a live session.
pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/refresh", post(refresh))
        .route("/api/me", get(get_me).patch(update_me))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    /// Gateway session JWT; also set as a cookie
    pub token: String,
    pub user: User,
}

/// Log in against the core API and open a gateway session.
///
/// Posts credentials, then fetches the full user record with the fresh
/// access token. Any failure aborts the login: nothing is stored and the
/// upstream error surfaces. No retry.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = state.core.login(&body.email, &body.password).await?;
    let user = state.core.current_user(&token.access).await?;

    let session_id = state.sessions.insert(token, user.clone());
    let jwt = create_jwt(session_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(
        session_id = %session_id,
        user_id = user.id,
        role = ?user.role,
        "Login successful, session opened"
    );

    let cookie = session_cookie(jwt.clone());
    Ok((jar.add(cookie), Json(LoginResponse { token: jwt, user })))
}

/// Log out: drop the session entry so no later call can read a stale token.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Extension(current): Extension<CurrentUser>,
) -> Result<(CookieJar, StatusCode)> {
    state.sessions.remove(current.session_id);
    tracing::info!(session_id = %current.session_id, "Session closed");

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}

/// Exchange the stored refresh token for a new pair.
///
/// On upstream rejection the session is removed: the user logs in again.
async fn refresh(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<StatusCode> {
    let entry = state
        .sessions
        .get(current.session_id)
        .ok_or(AppError::Unauthorized)?;

    match state.core.refresh(&entry.token.refresh).await {
        Ok(token) => {
            state.sessions.set_token(current.session_id, token);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            tracing::info!(
                session_id = %current.session_id,
                error = %e,
                "Refresh failed, forcing logout"
            );
            state.sessions.remove(current.session_id);
            Err(AppError::InvalidToken)
        }
    }
}

/// Get the current user, re-fetched from the core API.
///
/// An upstream auth failure here clears the session (forced logout); the
/// frontend redirects to login on the resulting 401.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<User>> {
    let token = crate::routes::access_token(&state, current.session_id)?;

    let user = state
        .core
        .current_user(&token)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    state.sessions.set_user(current.session_id, user.clone());
    Ok(Json(user))
}

/// Update the current user's own profile fields.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>> {
    update
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = crate::routes::access_token(&state, current.session_id)?;
    let user = state
        .core
        .update_user(&token, current.user.id, &update)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    state.sessions.set_user(current.session_id, user.clone());
    Ok(Json(user))
}

fn session_cookie(jwt: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, jwt))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
