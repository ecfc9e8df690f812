//! Admin API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/reservation-ttl",
        get(handler::get_ttl).patch(handler::update_ttl),
    )
}
