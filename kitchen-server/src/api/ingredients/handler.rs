//! Ingredient API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::request::IngredientUpdateRequest;
use shared::response::IngredientView;
use shared::types::IngredientId;
use tracing::info;

use crate::availability;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/ingredients - inventory with derived availability
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<IngredientView>>> {
    let views = availability::ingredient_views(&state.ledger.snapshot());
    Ok(Json(views))
}

/// PATCH /api/ingredients/:id - kitchen stock edit
///
/// Existing holds are never revoked by a stock edit; the new numbers only
/// constrain future reserve attempts.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<IngredientId>,
    Json(payload): Json<IngredientUpdateRequest>,
) -> AppResult<Json<IngredientView>> {
    if payload.on_hand_qty.is_none() && payload.is_out.is_none() {
        return Err(AppError::Validation(
            "Provide on_hand_qty and/or is_out".to_string(),
        ));
    }

    let ingredient = state
        .ledger
        .update_stock(id, payload.on_hand_qty, payload.is_out)?;
    state.notifier.notify();
    info!(
        ingredient_id = id,
        on_hand_qty = ingredient.on_hand_qty,
        is_out = ingredient.is_out,
        "ingredient stock updated"
    );

    let mut views = availability::ingredient_views(std::slice::from_ref(&ingredient));
    Ok(Json(views.remove(0)))
}
