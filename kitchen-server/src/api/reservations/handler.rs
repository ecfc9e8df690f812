//! Reservation API handlers
//!
//! Every touchpoint materializes lazy expiry before acting, so a
//! reservation whose TTL elapsed is indistinguishable from one expired by
//! the background sweep.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::request::ReservationItemsRequest;
use shared::response::{ReservationActionResponse, ReservationCreated, ReservationView};
use shared::types::ReservationId;

use crate::core::ServerState;
use crate::utils::time::utc_now;
use crate::utils::{AppError, AppResult};

fn view(reservation: shared::models::Reservation) -> ReservationView {
    ReservationView {
        id: reservation.id,
        status: reservation.status,
        expires_at: reservation.expires_at,
        items: reservation.items,
    }
}

/// POST /api/reservations - place a hold on the cart's ingredients
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationItemsRequest>,
) -> AppResult<(StatusCode, Json<ReservationCreated>)> {
    let reservation = state.engine.create(payload.items, utc_now())?;
    let body = ReservationCreated {
        id: reservation.id,
        status: reservation.status,
        expires_at: reservation.expires_at,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/reservations/:id - current snapshot, terminal states included
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<ReservationId>,
) -> AppResult<Json<ReservationView>> {
    let reservation = state
        .engine
        .get(id, utc_now())
        .ok_or_else(|| AppError::NotFound(format!("Reservation {id}")))?;
    Ok(Json(view(reservation)))
}

/// PATCH /api/reservations/:id - replace the items, refresh the deadline
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<ReservationId>,
    Json(payload): Json<ReservationItemsRequest>,
) -> AppResult<Json<ReservationView>> {
    let reservation = state.engine.modify(id, payload.items, utc_now())?;
    Ok(Json(view(reservation)))
}

/// POST /api/reservations/:id/commit - turn the hold into consumption
pub async fn commit(
    State(state): State<ServerState>,
    Path(id): Path<ReservationId>,
) -> AppResult<Json<ReservationActionResponse>> {
    let reservation = state.engine.commit(id, utc_now())?;
    Ok(Json(ReservationActionResponse {
        id: reservation.id,
        status: reservation.status,
    }))
}

/// POST /api/reservations/:id/release - give the hold back
pub async fn release(
    State(state): State<ServerState>,
    Path(id): Path<ReservationId>,
) -> AppResult<Json<ReservationActionResponse>> {
    let reservation = state.engine.release(id, utc_now())?;
    Ok(Json(ReservationActionResponse {
        id: reservation.id,
        status: reservation.status,
    }))
}
