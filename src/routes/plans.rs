// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Membership plan and subscription routes.

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
use crate::models::{MembershipPlan, PlanCreate, PlanUpdate, Role, Subscription};
use crate::routes::{access_token, map_upstream, require_admin, ConfirmBody, ListQuery};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/plans", get(list_plans).post(create_plan))
        .route(
            "/api/plans/{id}",
            get(get_plan).patch(update_plan).delete(delete_plan),
        )
        .route("/api/subscriptions", get(list_subscriptions))
}

#[derive(Serialize)]
pub struct PlanListResponse {
    pub plans: Vec<MembershipPlan>,
    pub total: usize,
}

/// List plans with name/description search. Any role.
async fn list_plans(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PlanListResponse>> {
    let term = params.term()?;

    let token = access_token(&state, current.session_id)?;
    let plans = state
        .core
        .list_plans(&token)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    let plans = filter::apply(plans, term);
    let total = plans.len();
    Ok(Json(PlanListResponse { plans, total }))
}

async fn get_plan(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> Result<Json<MembershipPlan>> {
    let token = access_token(&state, current.session_id)?;
    let plan = state
        .core
        .get_plan(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;
    Ok(Json(plan))
}

/// Create a plan. Admin only.
async fn create_plan(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<PlanCreate>,
) -> Result<(StatusCode, Json<MembershipPlan>)> {
    require_admin(&current)?;
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = access_token(&state, current.session_id)?;
    let plan = state
        .core
        .create_plan(&token, &body)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(plan_id = plan.id, by = current.user.id, "Plan created");
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn update_plan(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
    Json(update): Json<PlanUpdate>,
) -> Result<Json<MembershipPlan>> {
    require_admin(&current)?;
    update
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let token = access_token(&state, current.session_id)?;
    let plan = state
        .core
        .update_plan(&token, id, &update)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;
    Ok(Json(plan))
}

/// Delete a plan after explicit confirmation. Admin only.
async fn delete_plan(
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
        .delete_plan(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(plan_id = id, by = current.user.id, "Plan deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct SubscriptionListResponse {
    pub subscriptions: Vec<Subscription>,
    pub total: usize,
}

/// List subscriptions. Members see their own; staff/admin see all.
async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<SubscriptionListResponse>> {
    let scope = match current.user.role {
        Role::Member => Some(current.user.id),
        Role::Admin | Role::Staff => None,
    };

    let token = access_token(&state, current.session_id)?;
    let subscriptions = state
        .core
        .list_subscriptions(&token, scope)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    let total = subscriptions.len();
    Ok(Json(SubscriptionListResponse {
        subscriptions,
        total,
    }))
}
