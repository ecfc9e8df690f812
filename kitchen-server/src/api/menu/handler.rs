//! Menu API handlers

use axum::{Json, extract::State};
use shared::response::MenuItemView;

use crate::availability;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/menu - menu items with availability derived from the ledger
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItemView>>> {
    let views = availability::menu_views(&state.catalog.snapshot(), &state.ledger.snapshot());
    Ok(Json(views))
}
