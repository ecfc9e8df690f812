//! Unified error system for KitchenSync
//!
//! - [`ErrorCode`]: standardized string codes carried on the wire
//! - [`ErrorBody`]: generic `{error, code}` payload for non-conflict failures
//! - [`ConflictBody`] / [`IngredientShortfall`]: the fixed
//!   insufficient-ingredients contract consumed by ordering clients
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorBody, ErrorCode};
//!
//! let body = ErrorBody::new("Reservation not found", ErrorCode::NotFound);
//! assert_eq!(body.code, ErrorCode::NotFound);
//! ```

mod codes;
mod http;
mod types;

pub use codes::ErrorCode;
pub use types::{ConflictBody, ErrorBody, IngredientShortfall};
