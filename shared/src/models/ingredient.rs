//! Ingredient model

use serde::{Deserialize, Serialize};

use crate::types::{IngredientId, Qty};

/// Ingredient stock record
///
/// `on_hand_qty` is edited by the kitchen; `active_reserved_qty` is owned
/// by the reservation engine and always equals the recipe-expanded sum over
/// currently active reservations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub on_hand_qty: Qty,
    pub active_reserved_qty: Qty,
    pub low_stock_threshold_qty: Qty,
    pub is_out: bool,
}

impl Ingredient {
    /// Fresh stock record with nothing reserved
    pub fn new(
        id: IngredientId,
        name: impl Into<String>,
        on_hand_qty: Qty,
        low_stock_threshold_qty: Qty,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            on_hand_qty,
            active_reserved_qty: 0,
            low_stock_threshold_qty,
            is_out: false,
        }
    }

    /// Quantity still available for new reservations
    ///
    /// Zero when the ingredient is marked out, otherwise
    /// `max(0, on_hand - active_reserved)`.
    pub fn available_qty(&self) -> Qty {
        if self.is_out {
            return 0;
        }
        self.on_hand_qty.saturating_sub(self.active_reserved_qty)
    }

    /// Whether available stock has fallen to the low-stock threshold
    pub fn low_stock(&self) -> bool {
        self.available_qty() <= self.low_stock_threshold_qty
    }
}
