//! Internal operator API

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/internal/expire-once", post(handler::expire_once))
}
