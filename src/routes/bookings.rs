// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking and attendance routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{Attendance, Booking, BookingStatus, Role};
use crate::routes::{access_token, map_upstream, require_staff, ConfirmBody};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/{id}", get(get_booking).delete(delete_booking))
        .route("/api/bookings/{id}/cancel", post(cancel_booking))
        .route("/api/bookings/{id}/attendance", post(mark_attendance))
}

#[derive(Debug, Default, Deserialize)]
struct BookingListQuery {
    /// Staff may scope to one member; ignored for member sessions
    member: Option<u64>,
}

#[derive(Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub total: usize,
}

/// List bookings. Members always see only their own.
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<BookingListQuery>,
) -> Result<Json<BookingListResponse>> {
    let scope = match current.user.role {
        Role::Member => Some(current.user.id),
        Role::Admin | Role::Staff => params.member,
    };

    let token = access_token(&state, current.session_id)?;
    let bookings = state
        .core
        .list_bookings(&token, scope)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    let total = bookings.len();
    Ok(Json(BookingListResponse { bookings, total }))
}

#[derive(Debug, Deserialize)]
struct BookingCreateRequest {
    fitness_class: u64,
    /// Staff may book on behalf of a member
    member: Option<u64>,
}

/// Create a booking directly (no payment). Members book for themselves;
/// staff may book for any member. Paid bookings go through checkout instead.
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<BookingCreateRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    let member = match current.user.role {
        Role::Member => current.user.id,
        Role::Admin | Role::Staff => body.member.ok_or_else(|| {
            AppError::BadRequest("'member' is required for staff bookings".to_string())
        })?,
    };

    let token = access_token(&state, current.session_id)?;
    let booking = state
        .core
        .create_booking(&token, member, body.fitness_class)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(
        booking_id = booking.id,
        member,
        class_id = body.fitness_class,
        "Booking created"
    );
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Booking detail. Owner or staff.
async fn get_booking(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> Result<Json<Booking>> {
    let token = access_token(&state, current.session_id)?;
    let booking = state
        .core
        .get_booking(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    check_booking_access(&current, &booking)?;
    Ok(Json(booking))
}

/// Cancel a booking: status goes to CANCELLED. Owner or staff.
async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> Result<Json<Booking>> {
    let token = access_token(&state, current.session_id)?;
    let booking = state
        .core
        .get_booking(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    check_booking_access(&current, &booking)?;

    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::Conflict("booking is already cancelled".to_string()));
    }

    let booking = state
        .core
        .set_booking_status(&token, id, BookingStatus::Cancelled)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(booking_id = id, by = current.user.id, "Booking cancelled");
    Ok(Json(booking))
}

#[derive(Debug, Deserialize)]
struct AttendanceRequest {
    present: bool,
}

/// Record a present/absent mark against a booking. Staff/admin only.
async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<u64>,
    Json(body): Json<AttendanceRequest>,
) -> Result<(StatusCode, Json<Attendance>)> {
    require_staff(&current)?;

    let token = access_token(&state, current.session_id)?;
    let attendance = state
        .core
        .create_attendance(&token, id, body.present, current.user.id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(
        booking_id = id,
        present = body.present,
        marked_by = current.user.id,
        "Attendance recorded"
    );
    Ok((StatusCode::CREATED, Json(attendance)))
}

/// Delete a booking after explicit confirmation. Staff/admin only.
async fn delete_booking(
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
        .delete_booking(&token, id)
        .await
        .map_err(|e| map_upstream(&state, current.session_id, e))?;

    tracing::info!(booking_id = id, by = current.user.id, "Booking deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Owner-or-staff check, matched exhaustively on the role.
fn check_booking_access(current: &CurrentUser, booking: &Booking) -> Result<()> {
    match current.user.role {
        Role::Admin | Role::Staff => Ok(()),
        Role::Member if booking.member == current.user.id => Ok(()),
        Role::Member => Err(AppError::Forbidden(
            "bookings can only be viewed by their owner".to_string(),
        )),
    }
}
