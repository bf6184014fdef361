// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Class feedback routes.

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
use crate::models::{Feedback, FeedbackCreate};
use crate::routes::{
    access_token, map_upstream, require_admin, require_member, ConfirmBody, ListQuery,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/feedback", get(list_feedback).post(create_feedback))
        .route("/api/feedback/{id}", axum::routing::delete(delete_feedback))
}

#[derive(Serialize)]
pub struct FeedbackListResponse {
    pub feedback: Vec<Feedback>,
    pub total: usize,
}

/// List feedback with comment search. Any role.
async fn list_feedback(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<ListQuery>,
) -> Result<Json<FeedbackListResponse>> {
    let term = params.term()?;

    let token = access_token(&state, current.session_id)?;
    let feedback = state
        .core
        .list_feedback(&token)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    let feedback = filter::apply(feedback, term);
    let total = feedback.len();
    Ok(Json(FeedbackListResponse { feedback, total }))
}

/// Submit feedback for a class. Members only; rating must be 1-5.
async fn create_feedback(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<FeedbackCreate>,
) -> Result<(StatusCode, Json<Feedback>)> {
    require_member(&current)?;
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = access_token(&state, current.session_id)?;
    let feedback = state
        .core
        .create_feedback(&token, current.user.id, &body)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(
        feedback_id = feedback.id,
        class_id = body.fitness_class,
        rating = body.rating,
        "Feedback submitted"
    );
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// Remove feedback after explicit confirmation. Admin only.
async fn delete_feedback(
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
        .delete_feedback(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(feedback_id = id, by = current.user.id, "Feedback deleted");
    Ok(StatusCode::NO_CONTENT)
}
