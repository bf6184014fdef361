// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Checkout routes: paid class bookings and plan subscriptions.
//!
//! On success the response carries the external payment URL the browser
//! navigates to. On a step failure the saga record is returned with 502 so
//! the frontend can show where the chain stopped; the saga stays queryable.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::routes::{access_token, map_upstream, require_member};
use crate::services::checkout::{CheckoutTarget, SagaRecord, SagaState};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/checkout/class", post(checkout_class))
        .route("/api/checkout/plan", post(checkout_plan))
        .route("/api/checkout/{saga_id}", get(get_saga))
}

#[derive(Debug, Deserialize)]
struct ClassCheckoutRequest {
    class_id: u64,
}

#[derive(Debug, Deserialize)]
struct PlanCheckoutRequest {
    plan_id: u64,
}

/// Book and pay for a class. Members only.
async fn checkout_class(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<ClassCheckoutRequest>,
) -> Result<Response> {
    run_checkout(&state, &current, CheckoutTarget::Class(body.class_id)).await
}

/// Subscribe to and pay for a plan. Members only.
async fn checkout_plan(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<PlanCheckoutRequest>,
) -> Result<Response> {
    run_checkout(&state, &current, CheckoutTarget::Plan(body.plan_id)).await
}

async fn run_checkout(
    state: &Arc<AppState>,
    current: &CurrentUser,
    target: CheckoutTarget,
) -> Result<Response> {
    require_member(current)?;

    let token = access_token(state, current.session_id)?;
    let record = state
        .checkout
        .run(
            &state.core,
            &token,
            current.session_id,
            current.user.id,
            target,
        )
        .await?;

    // A step failure from an expired core token still forces logout
    if let SagaState::Failed { reason, .. } = &record.state {
        let failure = AppError::CoreApi(reason.clone());
        if failure.is_core_auth_error() {
            return Err(map_upstream(state, current.session_id, failure));
        }
    }

    Ok(saga_response(record))
}

/// Saga status, visible only to the session that started it.
async fn get_saga(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(saga_id): Path<Uuid>,
) -> Result<Json<SagaRecord>> {
    let record = state
        .checkout
        .get(saga_id, current.session_id)
        .ok_or_else(|| AppError::NotFound(format!("Checkout {}", saga_id)))?;
    Ok(Json(record))
}

fn saga_response(record: SagaRecord) -> Response {
    let status = match record.state {
        SagaState::Failed { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Json(record)).into_response()
}
