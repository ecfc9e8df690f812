//! KitchenSync Server - restaurant ordering coordination
//!
//! # Architecture
//!
//! The server owns the authoritative inventory and reservation state:
//!
//! - **Ingredient Ledger** (`ledger`): on-hand and active-reserved
//!   quantities per ingredient, mutated only through atomic all-or-nothing
//!   transactions
//! - **Availability** (`availability`): pure derivation of per-menu-item
//!   availability from a ledger snapshot and recipes
//! - **Reservation Engine** (`reservations`): the create/modify/commit/
//!   release/expire state machine plus the runtime TTL policy
//! - **Change Notifier** (`services::notifier`): payload-free "state
//!   changed" broadcast consumed by clients as a re-fetch hint
//! - **HTTP API** (`api`): axum routers per resource
//!
//! # Module structure
//!
//! ```text
//! kitchen-server/src/
//! ├── core/          # config, state, server assembly, background tasks
//! ├── ledger/        # ingredient stock ledger
//! ├── catalog.rs     # menu item store
//! ├── availability.rs
//! ├── reservations/  # reservation engine + TTL policy
//! ├── services/      # change notifier
//! ├── api/           # HTTP routes and handlers
//! ├── seed.rs        # demo inventory bootstrap
//! └── utils/         # errors, logging, time
//! ```

pub mod api;
pub mod availability;
pub mod catalog;
pub mod core;
pub mod ledger;
pub mod reservations;
pub mod seed;
pub mod services;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use catalog::Catalog;
pub use ledger::Ledger;
pub use reservations::{ReservationEngine, TtlPolicy};
pub use services::ChangeNotifier;
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};
