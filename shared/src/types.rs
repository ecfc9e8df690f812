//! Common identifier and quantity types

/// Ingredient identifier
pub type IngredientId = u64;

/// Menu item identifier
pub type MenuItemId = u64;

/// Reservation identifier
pub type ReservationId = u64;

/// Ingredient / menu item quantity (always non-negative)
pub type Qty = u32;
