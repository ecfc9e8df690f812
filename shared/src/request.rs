//! Request payloads

use serde::{Deserialize, Serialize};

use crate::types::{MenuItemId, Qty};

/// One cart line as submitted by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationItemInput {
    pub menu_item_id: MenuItemId,
    pub qty: Qty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /api/reservations` and `PATCH /api/reservations/{id}`
///
/// The item list always replaces the reservation's previous items
/// (last-write-wins, no partial merge).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationItemsRequest {
    pub items: Vec<ReservationItemInput>,
}

/// Body of `PATCH /api/ingredients/{id}` (kitchen stock edits)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_hand_qty: Option<Qty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_out: Option<bool>,
}

/// Body of `PATCH /api/admin/reservation-ttl`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtlUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_threshold_seconds: Option<u32>,
}
