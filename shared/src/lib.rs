//! KitchenSync shared types
//!
//! Domain models, wire payloads, and the structured error system shared
//! between `kitchen-server` and `kitchen-client`:
//!
//! - [`models`]: ingredients, menu items, reservations
//! - [`error`]: error codes, HTTP mapping, and the insufficient-ingredients
//!   conflict contract
//! - [`request`] / [`response`]: request and response payloads for the
//!   reservation, ingredient, menu, and admin endpoints

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod types;

// Re-export common types
pub use error::{ConflictBody, ErrorBody, ErrorCode, IngredientShortfall};
pub use models::{Ingredient, MenuItem, Reservation, ReservationItem, ReservationStatus};
pub use types::{IngredientId, MenuItemId, Qty, ReservationId};
