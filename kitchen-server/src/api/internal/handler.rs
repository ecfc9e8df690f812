//! Internal operator handlers

use axum::{Json, extract::State, http::HeaderMap};
use shared::response::ExpireOnceResponse;
use tracing::info;

use crate::core::ServerState;
use crate::utils::time::utc_now;
use crate::utils::{AppError, AppResult};

const SECRET_HEADER: &str = "x-internal-secret";

/// POST /api/internal/expire-once - run one expiry sweep on demand
///
/// Guarded by a shared secret; an empty configured secret disables the
/// endpoint entirely.
pub async fn expire_once(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<ExpireOnceResponse>> {
    let secret = state.config.internal_expire_secret.as_str();
    if secret.is_empty() {
        return Err(AppError::NotFound("expire-once".to_string()));
    }
    let presented = headers
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(secret) {
        return Err(AppError::Unauthorized);
    }

    let expired_count = state.engine.sweep(utc_now());
    info!(expired_count, "manual expiry sweep");
    Ok(Json(ExpireOnceResponse {
        status: "ok".to_string(),
        expired_count,
    }))
}
