// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard summary route: the numbers behind the landing-page tiles.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::CurrentUser;
use crate::models::{BookingStatus, Role};
use crate::routes::{access_token, map_upstream};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard", get(get_dashboard))
}

/// Tile counts; the shape depends on who is asking.
#[derive(Serialize)]
#[serde(untagged)]
pub enum DashboardResponse {
    Desk {
        member_count: usize,
        class_count: usize,
        booking_count: usize,
        active_plan_count: usize,
    },
    Member {
        booked: usize,
        attended: usize,
        cancelled: usize,
        subscription_count: usize,
    },
}

/// Aggregate counts for the dashboard tiles.
///
/// Staff/admin get studio-wide numbers; members get their own booking
/// history and subscriptions. Upstream list fetches run concurrently.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<DashboardResponse>> {
    let token = access_token(&state, current.session_id)?;

    let response = match current.user.role {
        Role::Admin | Role::Staff => {
            let (users, classes, bookings, plans) = tokio::join!(
                state.core.list_users(&token),
                state.core.list_classes(&token),
                state.core.list_bookings(&token, None),
                state.core.list_plans(&token),
            );

            let users = users.map_err(|e| map_upstream(&state, current.session_id, e))?;
            let classes = classes.map_err(|e| map_upstream(&state, current.session_id, e))?;
            let bookings = bookings.map_err(|e| map_upstream(&state, current.session_id, e))?;
            let plans = plans.map_err(|e| map_upstream(&state, current.session_id, e))?;

            DashboardResponse::Desk {
                member_count: users.len(),
                class_count: classes.iter().filter(|c| c.is_active).count(),
                booking_count: bookings.len(),
                active_plan_count: plans.iter().filter(|p| p.is_active).count(),
            }
        }
        Role::Member => {
            let (bookings, subscriptions) = tokio::join!(
                state.core.list_bookings(&token, Some(current.user.id)),
                state.core.list_subscriptions(&token, Some(current.user.id)),
            );

            let bookings = bookings.map_err(|e| map_upstream(&state, current.session_id, e))?;
            let subscriptions =
                subscriptions.map_err(|e| map_upstream(&state, current.session_id, e))?;

            let count_status = |status: BookingStatus| {
                bookings.iter().filter(|b| b.status == status).count()
            };

            DashboardResponse::Member {
                booked: count_status(BookingStatus::Booked),
                attended: count_status(BookingStatus::Attended),
                cancelled: count_status(BookingStatus::Cancelled),
                subscription_count: subscriptions.len(),
            }
        }
    };

    Ok(Json(response))
}
