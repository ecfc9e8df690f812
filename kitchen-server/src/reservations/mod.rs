//! Reservation Engine
//!
//! The reservation lifecycle and inventory-consistency core:
//!
//! - [`engine`]: the `active → committed | released | expired` state
//!   machine with per-reservation serialized mutations
//! - [`ttl`]: the process-wide runtime TTL policy read at every creation
//!
//! # Lifecycle
//!
//! ```text
//! create(items) ──reserve──▶ active ──commit──▶ committed
//!                              │  ▲               (ledger hold becomes
//!                              │  └modify          permanent consumption)
//!                              ├──release────▶ released
//!                              └──ttl elapsed─▶ expired
//!                                  (lazy on access, or periodic sweep)
//! ```
//!
//! Invariant: for every ingredient, `active_reserved_qty` equals the sum of
//! recipe-expanded lines across reservations whose status is `active`.

pub mod engine;
pub mod ttl;

pub use engine::{EngineError, ReservationEngine};
pub use ttl::{TtlError, TtlPolicy};
