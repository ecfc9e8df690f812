//! Reservation model and status state machine

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{IngredientId, MenuItemId, Qty, ReservationId};

/// Reservation lifecycle status
///
/// ```text
/// active ──commit──▶ committed   (terminal)
///   │──release─────▶ released    (terminal)
///   └──ttl elapsed─▶ expired     (terminal)
/// ```
///
/// No transition leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Committed,
    Released,
    Expired,
}

impl ReservationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Committed => "committed",
            Self::Released => "released",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cart line inside a reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationItem {
    pub menu_item_id: MenuItemId,
    pub qty: Qty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A time-bounded exclusive hold on ingredient quantities
///
/// `reserved_lines` is the recipe-expanded ingredient hold backing `items`;
/// it is exactly what the ledger was charged and exactly what release or
/// commit will settle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub status: ReservationStatus,
    pub items: Vec<ReservationItem>,
    pub reserved_lines: BTreeMap<IngredientId, Qty>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether the reservation is logically past its expiry
    ///
    /// True only for `active` reservations; terminal states never re-expire.
    pub fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        self.status == ReservationStatus::Active && self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ReservationStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
        let back: ReservationStatus = serde_json::from_str("\"expired\"").unwrap();
        assert_eq!(back, ReservationStatus::Expired);
    }

    #[test]
    fn only_active_can_be_past_expiry() {
        let now = Utc::now();
        let mut reservation = Reservation {
            id: 1,
            status: ReservationStatus::Active,
            items: vec![],
            reserved_lines: BTreeMap::new(),
            created_at: now - Duration::minutes(20),
            expires_at: now - Duration::minutes(10),
        };
        assert!(reservation.is_past_expiry(now));

        reservation.status = ReservationStatus::Released;
        assert!(!reservation.is_past_expiry(now));
    }
}
