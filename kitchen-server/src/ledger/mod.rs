//! Ingredient Ledger
//!
//! Single source of truth for stock. Owns per-ingredient on-hand and
//! active-reserved quantities; every multi-ingredient update is applied
//! all-or-nothing under one write-lock scope so a torn update is never
//! observable.
//!
//! # Data flow
//!
//! ```text
//! kitchen stock edit ──▶ update_stock(on_hand, is_out)
//! reservation create ──▶ reserve(lines)      (validate, then apply)
//! reservation modify ──▶ swap(old, new)      (atomic release + reserve)
//! reservation commit ──▶ commit(lines)       (on_hand and reserved drop together)
//! release / expiry   ──▶ release(lines)      (floored, never fails)
//! ```

mod store;

pub use store::{Ledger, LedgerError, ReserveLines};
