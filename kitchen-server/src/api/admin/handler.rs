//! Admin API handlers
//!
//! TTL policy changes apply to reservations created afterwards; deadlines
//! already handed out are never rewritten.

use axum::{Json, extract::State};
use shared::request::TtlUpdateRequest;
use shared::response::TtlSnapshot;
use tracing::info;

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/admin/reservation-ttl - current policy with its bounds
pub async fn get_ttl(State(state): State<ServerState>) -> AppResult<Json<TtlSnapshot>> {
    Ok(Json(state.ttl.snapshot()))
}

/// PATCH /api/admin/reservation-ttl - operator update, validated as a whole
pub async fn update_ttl(
    State(state): State<ServerState>,
    Json(payload): Json<TtlUpdateRequest>,
) -> AppResult<Json<TtlSnapshot>> {
    let (snapshot, changed) = state
        .ttl
        .update(payload.ttl_minutes, payload.warning_threshold_seconds)?;
    if changed {
        state.notifier.notify();
        info!(
            ttl_seconds = snapshot.ttl_seconds,
            warning_threshold_seconds = snapshot.warning_threshold_seconds,
            "reservation ttl policy updated"
        );
    }
    Ok(Json(snapshot))
}
