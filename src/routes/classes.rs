// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness class routes.

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
use crate::models::{ClassCreate, ClassUpdate, FitnessClass};
use crate::routes::{access_token, map_upstream, require_staff, ConfirmBody, ListQuery};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/classes", get(list_classes).post(create_class))
        .route(
            "/api/classes/{id}",
            get(get_class).patch(update_class).delete(delete_class),
        )
}

#[derive(Serialize)]
pub struct ClassListResponse {
    pub classes: Vec<FitnessClass>,
    pub total: usize,
}

/// List classes with title/description/location search. Any role.
async fn list_classes(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ClassListResponse>> {
    let term = params.term()?;

    let token = access_token(&state, current.session_id)?;
    let classes = state
        .core
        .list_classes(&token)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    let classes = filter::apply(classes, term);
    let total = classes.len();
    Ok(Json(ClassListResponse { classes, total }))
}

async fn get_class(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> Result<Json<FitnessClass>> {
    let token = access_token(&state, current.session_id)?;
    let class = state
        .core
        .get_class(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;
    Ok(Json(class))
}

/// Create a class. Staff/admin; exactly one upstream call per submission.
async fn create_class(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<ClassCreate>,
) -> Result<(StatusCode, Json<FitnessClass>)> {
    require_staff(&current)?;
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = access_token(&state, current.session_id)?;
    let class = state
        .core
        .create_class(&token, &body)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(class_id = class.id, by = current.user.id, "Class created");
    Ok((StatusCode::CREATED, Json(class)))
}

async fn update_class(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
    Json(update): Json<ClassUpdate>,
) -> Result<Json<FitnessClass>> {
    require_staff(&current)?;
    update
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = access_token(&state, current.session_id)?;
    let class = state
        .core
        .update_class(&token, id, &update)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;
    Ok(Json(class))
}

/// Delete a class after explicit confirmation. Staff/admin.
async fn delete_class(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
    Json(body): Json<ConfirmBody>,
) -> Result<StatusCode> {
    require_staff(&current)?;
    body.check()?;

    let token = access_token(&state, current.session_id)?;
    state
        .core
        .delete_class(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(class_id = id, by = current.user.id, "Class deleted");
    Ok(StatusCode::NO_CONTENT)
}
