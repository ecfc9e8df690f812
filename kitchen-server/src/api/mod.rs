//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`menu`] - menu with derived availability
//! - [`ingredients`] - inventory views and kitchen stock edits
//! - [`reservations`] - reservation lifecycle
//! - [`admin`] - runtime TTL policy
//! - [`events`] - server-sent change notifications
//! - [`internal`] - operator-only expiry trigger

pub mod admin;
pub mod events;
pub mod health;
pub mod ingredients;
pub mod internal;
pub mod menu;
pub mod reservations;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(ingredients::router())
        .merge(reservations::router())
        .merge(admin::router())
        .merge(events::router())
        .merge(internal::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
