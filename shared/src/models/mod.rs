//! Data models
//!
//! Shared between kitchen-server and kitchen-client (via API).

pub mod ingredient;
pub mod menu_item;
pub mod reservation;

// Re-exports
pub use ingredient::*;
pub use menu_item::*;
pub use reservation::*;
