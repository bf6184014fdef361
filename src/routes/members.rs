// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Member (user) management routes for the front desk.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::filter;
use crate::middleware::auth::CurrentUser;
use crate::models::{User, UserCreate, UserUpdate};
use crate::routes::{
    access_token, map_upstream, require_admin, require_staff, ConfirmBody, ListQuery,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/members", get(list_members).post(create_member))
        .route(
            "/api/members/{id}",
            get(get_member).patch(update_member).delete(delete_member),
        )
}

#[derive(Serialize)]
pub struct MemberListResponse {
    pub members: Vec<User>,
    pub total: usize,
}

/// List all users, filtered by name/email search. Staff and admin only.
async fn list_members(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<ListQuery>,
) -> Result<Json<MemberListResponse>> {
    require_staff(&current)?;
    let term = params.term()?;

    let token = access_token(&state, current.session_id)?;
    let users = state
        .core
        .list_users(&token)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    let members = filter::apply(users, term);
    let total = members.len();
    Ok(Json(MemberListResponse { members, total }))
}

/// Member detail. Staff/admin, or the member reading their own record.
async fn get_member(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> Result<Json<User>> {
    if current.user.id != id {
        require_staff(&current)?;
    }

    let token = access_token(&state, current.session_id)?;
    let user = state
        .core
        .get_user(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;
    Ok(Json(user))
}

/// Create a user account. Admin only; exactly one upstream call.
async fn create_member(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>)> {
    require_admin(&current)?;
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = access_token(&state, current.session_id)?;
    let user = state
        .core
        .create_user(&token, &body)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(created_id = user.id, by = current.user.id, "Member created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a member's profile fields. Admin only.
async fn update_member(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>> {
    require_admin(&current)?;
    update
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = access_token(&state, current.session_id)?;
    let user = state
        .core
        .update_user(&token, id, &update)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;
    Ok(Json(user))
}

/// Delete a member. Admin only; the DELETE fires only after confirmation.
async fn delete_member(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
    Json(body): Json<ConfirmBody>,
) -> Result<StatusCode> {
    require_admin(&current)?;
    body.check()?;

    let token = access_token(&state, current.session_id)?;
    state
        .core
        .delete_user(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(deleted_id = id, by = current.user.id, "Member deleted");
    Ok(StatusCode::NO_CONTENT)
}
