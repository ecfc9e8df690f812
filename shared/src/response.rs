//! Response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ReservationItem, ReservationStatus};
use crate::types::{IngredientId, MenuItemId, Qty, ReservationId};

/// `201 Created` body for `POST /api/reservations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreated {
    pub id: ReservationId,
    pub status: ReservationStatus,
    pub expires_at: DateTime<Utc>,
}

/// Full reservation snapshot for `GET /api/reservations/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationView {
    pub id: ReservationId,
    pub status: ReservationStatus,
    pub expires_at: DateTime<Utc>,
    pub items: Vec<ReservationItem>,
}

/// `{id, status}` body for commit/release responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationActionResponse {
    pub id: ReservationId,
    pub status: ReservationStatus,
}

/// Ingredient view with derived availability fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientView {
    pub id: IngredientId,
    pub name: String,
    pub on_hand_qty: Qty,
    pub active_reserved_qty: Qty,
    pub available_qty: Qty,
    pub low_stock_threshold_qty: Qty,
    pub is_out: bool,
    pub low_stock: bool,
}

/// Menu item view with derived availability
///
/// `max_qty_available` is `null` for items without a recipe (unconstrained).
/// `reason` names the first limiting ingredient when unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemView {
    pub id: MenuItemId,
    pub name: String,
    pub price_cents: u32,
    pub available: bool,
    pub low_stock: bool,
    pub max_qty_available: Option<Qty>,
    pub reason: Option<String>,
}

/// TTL policy snapshot for the admin endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtlSnapshot {
    pub ttl_seconds: u32,
    pub ttl_minutes: u32,
    pub min_seconds: u32,
    pub max_seconds: u32,
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub warning_threshold_seconds: u32,
    pub warning_min_seconds: u32,
    pub warning_max_seconds: u32,
}

/// Body of `POST /api/internal/expire-once`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpireOnceResponse {
    pub status: String,
    pub expired_count: usize,
}
