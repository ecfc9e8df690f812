//! Reservation engine: state machine and ledger coordination
//!
//! # Operation flow
//!
//! ```text
//! create / modify
//!     ├─ 1. Normalize items (merge duplicates, drop zero quantities)
//!     ├─ 2. Recipe-expand into per-ingredient reserve lines
//!     ├─ 3. Ledger reserve / swap (all-or-nothing, full shortfall list)
//!     ├─ 4. Store reservation with expires_at = now + ttl
//!     └─ 5. Broadcast state change
//! ```
//!
//! Every mutation of an existing reservation runs under that id's map
//! entry lock, so modify's release+reserve swap is atomic with respect to
//! concurrent commit/release/sweep on the same id. Lock order is always
//! reservation entry first, ledger second.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use shared::error::IngredientShortfall;
use shared::models::{Reservation, ReservationItem, ReservationStatus};
use shared::request::ReservationItemInput;
use shared::types::{MenuItemId, ReservationId};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::ledger::{Ledger, LedgerError, ReserveLines};
use crate::services::ChangeNotifier;

use super::ttl::TtlPolicy;

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),

    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),

    #[error("Reservation is {status}")]
    NotActive {
        id: ReservationId,
        status: ReservationStatus,
    },

    #[error("Reservation expired")]
    Expired(ReservationId),

    #[error("Insufficient stock for {} ingredient(s)", .0.len())]
    InsufficientStock(Vec<IngredientShortfall>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<LedgerError> for EngineError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientStock(shortfalls) => Self::InsufficientStock(shortfalls),
            // Recipes referencing unknown ingredients are a data defect,
            // not a client error
            LedgerError::IngredientNotFound(id) => {
                Self::Internal(format!("recipe references unknown ingredient {id}"))
            }
        }
    }
}

/// Resolve the effective status of a reservation at `now`
///
/// Single source of truth for lazy and periodic expiry: an `active`
/// reservation past its `expires_at` is logically `expired` even before
/// anything has persisted the transition.
pub fn materialize_status(reservation: &Reservation, now: DateTime<Utc>) -> ReservationStatus {
    if reservation.is_past_expiry(now) {
        ReservationStatus::Expired
    } else {
        reservation.status
    }
}

/// The reservation state machine
///
/// Owns all reservations and is the only writer of the ledger's
/// active-reserved quantities.
pub struct ReservationEngine {
    reservations: DashMap<ReservationId, Reservation>,
    next_id: AtomicU64,
    ledger: Arc<Ledger>,
    catalog: Arc<Catalog>,
    ttl: Arc<TtlPolicy>,
    notifier: ChangeNotifier,
}

impl ReservationEngine {
    pub fn new(
        ledger: Arc<Ledger>,
        catalog: Arc<Catalog>,
        ttl: Arc<TtlPolicy>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self {
            reservations: DashMap::new(),
            next_id: AtomicU64::new(1),
            ledger,
            catalog,
            ttl,
            notifier,
        }
    }

    /// Create a reservation, placing a hold on its recipe-expanded lines
    pub fn create(
        &self,
        items: Vec<ReservationItemInput>,
        now: DateTime<Utc>,
    ) -> Result<Reservation, EngineError> {
        let items = normalize_items(items)?;
        let lines = self.expand_lines(&items)?;

        self.ledger.reserve(&lines).map_err(|err| {
            tracing::warn!(item_count = items.len(), "create_reservation conflict");
            EngineError::from(err)
        })?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let expires_at = now + Duration::seconds(i64::from(self.ttl.ttl_seconds()));
        let reservation = Reservation {
            id,
            status: ReservationStatus::Active,
            items,
            reserved_lines: lines,
            created_at: now,
            expires_at,
        };
        self.reservations.insert(id, reservation.clone());
        self.notifier.notify();
        tracing::info!(
            reservation_id = id,
            expires_at = %expires_at,
            "create_reservation success"
        );
        Ok(reservation)
    }

    /// Fetch a reservation, materializing lazy expiry first
    pub fn get(&self, id: ReservationId, now: DateTime<Utc>) -> Option<Reservation> {
        let mut entry = self.reservations.get_mut(&id)?;
        self.expire_in_place(&mut entry, now);
        Some(entry.clone())
    }

    /// Replace the reservation's items, last-write-wins
    ///
    /// The old hold is released and the new one reserved as a single ledger
    /// transaction; on shortfall the reservation keeps its previous items
    /// and hold exactly. Success refreshes `expires_at`.
    pub fn modify(
        &self,
        id: ReservationId,
        items: Vec<ReservationItemInput>,
        now: DateTime<Utc>,
    ) -> Result<Reservation, EngineError> {
        let items = normalize_items(items)?;
        let lines = self.expand_lines(&items)?;

        let mut entry = self
            .reservations
            .get_mut(&id)
            .ok_or(EngineError::NotFound(id))?;

        if entry.status.is_terminal() {
            tracing::warn!(reservation_id = id, status = %entry.status, "update_reservation rejected");
            return Err(EngineError::NotActive {
                id,
                status: entry.status,
            });
        }
        if self.expire_in_place(&mut entry, now) {
            return Err(EngineError::Expired(id));
        }

        self.ledger.swap(&entry.reserved_lines, &lines).map_err(|err| {
            tracing::warn!(reservation_id = id, "update_reservation conflict");
            EngineError::from(err)
        })?;

        entry.items = items;
        entry.reserved_lines = lines;
        entry.expires_at = now + Duration::seconds(i64::from(self.ttl.ttl_seconds()));
        let reservation = entry.clone();
        drop(entry);

        self.notifier.notify();
        tracing::info!(
            reservation_id = id,
            expires_at = %reservation.expires_at,
            "update_reservation success"
        );
        Ok(reservation)
    }

    /// Commit the reservation: its hold becomes permanent consumption
    ///
    /// Idempotent for already-committed reservations; conflicts for
    /// released/expired ones.
    pub fn commit(&self, id: ReservationId, now: DateTime<Utc>) -> Result<Reservation, EngineError> {
        let mut entry = self
            .reservations
            .get_mut(&id)
            .ok_or(EngineError::NotFound(id))?;

        match entry.status {
            ReservationStatus::Committed => {
                tracing::info!(reservation_id = id, "commit_reservation idempotent");
                return Ok(entry.clone());
            }
            ReservationStatus::Released | ReservationStatus::Expired => {
                tracing::warn!(reservation_id = id, status = %entry.status, "commit_reservation rejected");
                return Err(EngineError::NotActive {
                    id,
                    status: entry.status,
                });
            }
            ReservationStatus::Active => {}
        }
        if self.expire_in_place(&mut entry, now) {
            return Err(EngineError::Expired(id));
        }

        self.ledger.commit(&entry.reserved_lines);
        entry.status = ReservationStatus::Committed;
        let reservation = entry.clone();
        drop(entry);

        self.notifier.notify();
        tracing::info!(reservation_id = id, "commit_reservation success");
        Ok(reservation)
    }

    /// Release the reservation's hold
    ///
    /// Idempotent: releasing an already released or expired reservation
    /// returns its current status without touching the ledger. Committed
    /// reservations cannot be released.
    pub fn release(
        &self,
        id: ReservationId,
        now: DateTime<Utc>,
    ) -> Result<Reservation, EngineError> {
        let mut entry = self
            .reservations
            .get_mut(&id)
            .ok_or(EngineError::NotFound(id))?;

        match entry.status {
            ReservationStatus::Committed => {
                tracing::warn!(reservation_id = id, "release_reservation rejected committed");
                return Err(EngineError::NotActive {
                    id,
                    status: entry.status,
                });
            }
            ReservationStatus::Released | ReservationStatus::Expired => {
                return Ok(entry.clone());
            }
            ReservationStatus::Active => {}
        }
        if self.expire_in_place(&mut entry, now) {
            return Ok(entry.clone());
        }

        self.ledger.release(&entry.reserved_lines);
        entry.status = ReservationStatus::Released;
        let reservation = entry.clone();
        drop(entry);

        self.notifier.notify();
        tracing::info!(reservation_id = id, "release_reservation success");
        Ok(reservation)
    }

    /// Expire every active reservation past its TTL, releasing its hold
    ///
    /// Returns the number of reservations expired. The periodic background
    /// sweep and the internal expire-once endpoint both call this.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut expired_count = 0;
        for mut entry in self.reservations.iter_mut() {
            if entry.is_past_expiry(now) {
                self.ledger.release(&entry.reserved_lines);
                entry.status = ReservationStatus::Expired;
                expired_count += 1;
                tracing::info!(reservation_id = entry.id, "reservation expired by sweep");
            }
        }
        if expired_count > 0 {
            self.notifier.notify();
        }
        expired_count
    }

    /// Persist lazy expiry for an entry already held under its lock
    ///
    /// Returns true when the reservation transitioned to expired here.
    fn expire_in_place(&self, reservation: &mut Reservation, now: DateTime<Utc>) -> bool {
        if materialize_status(reservation, now) != ReservationStatus::Expired
            || reservation.status == ReservationStatus::Expired
        {
            return false;
        }
        self.ledger.release(&reservation.reserved_lines);
        reservation.status = ReservationStatus::Expired;
        self.notifier.notify();
        tracing::warn!(reservation_id = reservation.id, "reservation expired on access");
        true
    }

    /// Recipe-expand normalized items into per-ingredient reserve lines
    fn expand_lines(&self, items: &[ReservationItem]) -> Result<ReserveLines, EngineError> {
        let mut lines = ReserveLines::new();
        let mut missing: Vec<MenuItemId> = Vec::new();

        for item in items {
            let Some(menu_item) = self.catalog.get(item.menu_item_id) else {
                missing.push(item.menu_item_id);
                continue;
            };
            for (&ingredient_id, &qty_required) in &menu_item.recipe {
                let required = qty_required.saturating_mul(item.qty);
                *lines.entry(ingredient_id).or_insert(0) += required;
            }
        }

        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(EngineError::Validation(format!(
                "Unknown menu_item_id values: {missing:?}"
            )));
        }
        Ok(lines)
    }

    #[cfg(test)]
    pub(crate) fn active_count(&self) -> usize {
        self.reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Active)
            .count()
    }
}

/// Normalize submitted items: merge duplicate menu ids, drop zero
/// quantities, reject an empty result
fn normalize_items(items: Vec<ReservationItemInput>) -> Result<Vec<ReservationItem>, EngineError> {
    let mut merged: BTreeMap<MenuItemId, ReservationItem> = BTreeMap::new();
    for input in items {
        if input.qty == 0 {
            continue;
        }
        match merged.get_mut(&input.menu_item_id) {
            Some(existing) => {
                existing.qty += input.qty;
                if input.notes.is_some() {
                    existing.notes = input.notes;
                }
            }
            None => {
                merged.insert(
                    input.menu_item_id,
                    ReservationItem {
                        menu_item_id: input.menu_item_id,
                        qty: input.qty,
                        notes: input.notes,
                    },
                );
            }
        }
    }

    if merged.is_empty() {
        return Err(EngineError::Validation(
            "items must be a non-empty list".to_string(),
        ));
    }
    Ok(merged.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Ingredient, MenuItem};
    use shared::types::{IngredientId, Qty};

    const TOMATOES: IngredientId = 1;
    const MOZZARELLA: IngredientId = 2;
    const BASIL: IngredientId = 3;

    const CAPRESE: MenuItemId = 10;
    const MARGHERITA: MenuItemId = 11;

    fn engine() -> ReservationEngine {
        let ledger = Arc::new(Ledger::new());
        ledger.insert(stock(TOMATOES, "Tomatoes", 10));
        ledger.insert(stock(MOZZARELLA, "Mozzarella", 8));
        ledger.insert(stock(BASIL, "Basil", 20));

        let catalog = Arc::new(Catalog::new());
        catalog.insert(
            MenuItem::new(CAPRESE, "Caprese", 950)
                .with_ingredient(TOMATOES, 2)
                .with_ingredient(MOZZARELLA, 1),
        );
        catalog.insert(
            MenuItem::new(MARGHERITA, "Margherita", 1200)
                .with_ingredient(TOMATOES, 1)
                .with_ingredient(MOZZARELLA, 2)
                .with_ingredient(BASIL, 1),
        );

        ReservationEngine::new(
            ledger,
            catalog,
            Arc::new(TtlPolicy::default()),
            ChangeNotifier::new(),
        )
    }

    fn stock(id: IngredientId, name: &str, on_hand: Qty) -> Ingredient {
        Ingredient {
            id,
            name: name.to_string(),
            on_hand_qty: on_hand,
            active_reserved_qty: 0,
            low_stock_threshold_qty: 0,
            is_out: false,
        }
    }

    fn item(menu_item_id: MenuItemId, qty: Qty) -> ReservationItemInput {
        ReservationItemInput {
            menu_item_id,
            qty,
            notes: None,
        }
    }

    fn reserved(engine: &ReservationEngine, id: IngredientId) -> Qty {
        engine.ledger.active_reserved(id).unwrap()
    }

    #[test]
    fn create_reserves_recipe_expanded_lines() {
        let engine = engine();
        let now = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 2)], now).unwrap();

        assert_eq!(reservation.status, ReservationStatus::Active);
        assert_eq!(reservation.expires_at, now + Duration::seconds(600));
        assert_eq!(reserved(&engine, TOMATOES), 4);
        assert_eq!(reserved(&engine, MOZZARELLA), 2);

        let fetched = engine.get(reservation.id, now).unwrap();
        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.items[0].qty, 2);
    }

    #[test]
    fn create_conflict_reports_shortfalls_and_mutates_nothing() {
        let engine = engine();
        let now = Utc::now();
        // 6 Caprese need 12 Tomatoes, only 10 on hand
        let err = engine.create(vec![item(CAPRESE, 6)], now).unwrap_err();

        match err {
            EngineError::InsufficientStock(shortfalls) => {
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].ingredient_name, "Tomatoes");
                assert_eq!(shortfalls[0].required_qty, 12);
                assert_eq!(shortfalls[0].available_qty, 10);
                assert!(!shortfalls[0].is_out);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(reserved(&engine, TOMATOES), 0);
        assert_eq!(reserved(&engine, MOZZARELLA), 0);
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn create_rejects_empty_and_zero_quantity_carts() {
        let engine = engine();
        let now = Utc::now();
        assert!(matches!(
            engine.create(vec![], now),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            engine.create(vec![item(CAPRESE, 0)], now),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_unknown_menu_items() {
        let engine = engine();
        let err = engine
            .create(vec![item(999, 1), item(CAPRESE, 1)], Utc::now())
            .unwrap_err();
        match err {
            EngineError::Validation(message) => assert!(message.contains("999")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_items_merge_by_summing() {
        let engine = engine();
        let reservation = engine
            .create(vec![item(CAPRESE, 1), item(CAPRESE, 2)], Utc::now())
            .unwrap();
        assert_eq!(reservation.items.len(), 1);
        assert_eq!(reservation.items[0].qty, 3);
        assert_eq!(reserved(&engine, TOMATOES), 6);
    }

    #[test]
    fn modify_swaps_hold_and_refreshes_expiry() {
        let engine = engine();
        let t0 = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 2)], t0).unwrap();

        let t1 = t0 + Duration::seconds(60);
        let updated = engine
            .modify(reservation.id, vec![item(MARGHERITA, 1)], t1)
            .unwrap();

        assert_eq!(updated.expires_at, t1 + Duration::seconds(600));
        assert_eq!(reserved(&engine, TOMATOES), 1);
        assert_eq!(reserved(&engine, MOZZARELLA), 2);
        assert_eq!(reserved(&engine, BASIL), 1);
    }

    #[test]
    fn modify_conflict_keeps_previous_items_and_hold() {
        let engine = engine();
        let now = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 2)], now).unwrap();

        // 9 Margherita need 18 Mozzarella, only 8 on hand
        let err = engine
            .modify(reservation.id, vec![item(MARGHERITA, 9)], now)
            .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientStock(_)));

        let unchanged = engine.get(reservation.id, now).unwrap();
        assert_eq!(unchanged.items, reservation.items);
        assert_eq!(reserved(&engine, TOMATOES), 4);
        assert_eq!(reserved(&engine, MOZZARELLA), 2);
        assert_eq!(reserved(&engine, BASIL), 0);
    }

    #[test]
    fn modify_can_grow_within_own_hold() {
        let engine = engine();
        let now = Utc::now();
        // 5 Caprese hold all 10 Tomatoes
        let reservation = engine.create(vec![item(CAPRESE, 5)], now).unwrap();
        assert_eq!(reserved(&engine, TOMATOES), 10);

        // Shrinking must succeed even though nothing is nominally available
        let updated = engine
            .modify(reservation.id, vec![item(CAPRESE, 4)], now)
            .unwrap();
        assert_eq!(updated.items[0].qty, 4);
        assert_eq!(reserved(&engine, TOMATOES), 8);
    }

    #[test]
    fn modify_unknown_reservation_is_not_found() {
        let engine = engine();
        assert!(matches!(
            engine.modify(42, vec![item(CAPRESE, 1)], Utc::now()),
            Err(EngineError::NotFound(42))
        ));
    }

    #[test]
    fn commit_converts_hold_to_consumption() {
        let engine = engine();
        let now = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 1)], now).unwrap();

        let committed = engine.commit(reservation.id, now).unwrap();
        assert_eq!(committed.status, ReservationStatus::Committed);

        let tomatoes = engine.ledger.get(TOMATOES).unwrap();
        assert_eq!(tomatoes.on_hand_qty, 8);
        assert_eq!(tomatoes.active_reserved_qty, 0);
        assert_eq!(tomatoes.available_qty(), 8);
    }

    #[test]
    fn commit_is_idempotent() {
        let engine = engine();
        let now = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 1)], now).unwrap();

        engine.commit(reservation.id, now).unwrap();
        let second = engine.commit(reservation.id, now).unwrap();
        assert_eq!(second.status, ReservationStatus::Committed);

        // Consumed once, not twice
        assert_eq!(engine.ledger.get(TOMATOES).unwrap().on_hand_qty, 8);
    }

    #[test]
    fn commit_after_expiry_fails_and_releases() {
        let engine = engine();
        let t0 = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 1)], t0).unwrap();

        let late = t0 + Duration::seconds(601);
        assert!(matches!(
            engine.commit(reservation.id, late),
            Err(EngineError::Expired(_))
        ));
        assert_eq!(reserved(&engine, TOMATOES), 0);
        assert_eq!(
            engine.get(reservation.id, late).unwrap().status,
            ReservationStatus::Expired
        );
        // On-hand stock untouched
        assert_eq!(engine.ledger.get(TOMATOES).unwrap().on_hand_qty, 10);
    }

    #[test]
    fn release_is_idempotent() {
        let engine = engine();
        let now = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 2)], now).unwrap();
        assert_eq!(reserved(&engine, TOMATOES), 4);

        let first = engine.release(reservation.id, now).unwrap();
        assert_eq!(first.status, ReservationStatus::Released);
        assert_eq!(reserved(&engine, TOMATOES), 0);

        let second = engine.release(reservation.id, now).unwrap();
        assert_eq!(second.status, ReservationStatus::Released);
        assert_eq!(reserved(&engine, TOMATOES), 0);
    }

    #[test]
    fn release_of_committed_reservation_conflicts() {
        let engine = engine();
        let now = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 1)], now).unwrap();
        engine.commit(reservation.id, now).unwrap();

        assert!(matches!(
            engine.release(reservation.id, now),
            Err(EngineError::NotActive { .. })
        ));
    }

    #[test]
    fn get_materializes_lazy_expiry() {
        let engine = engine();
        let t0 = Utc::now();
        let reservation = engine.create(vec![item(CAPRESE, 1)], t0).unwrap();

        let fetched = engine
            .get(reservation.id, t0 + Duration::seconds(601))
            .unwrap();
        assert_eq!(fetched.status, ReservationStatus::Expired);
        assert_eq!(reserved(&engine, TOMATOES), 0);
    }

    #[test]
    fn sweep_expires_only_past_due_reservations() {
        let engine = engine();
        let t0 = Utc::now();
        let expired = engine.create(vec![item(CAPRESE, 1)], t0).unwrap();
        let fresh = engine
            .create(vec![item(MARGHERITA, 1)], t0 + Duration::seconds(300))
            .unwrap();

        let count = engine.sweep(t0 + Duration::seconds(601));
        assert_eq!(count, 1);
        assert_eq!(
            engine
                .get(expired.id, t0 + Duration::seconds(601))
                .unwrap()
                .status,
            ReservationStatus::Expired
        );
        assert_eq!(
            engine
                .get(fresh.id, t0 + Duration::seconds(601))
                .unwrap()
                .status,
            ReservationStatus::Active
        );
        // Fresh reservation's hold survives the sweep
        assert_eq!(reserved(&engine, MOZZARELLA), 2);
    }

    #[test]
    fn ledger_invariant_holds_across_lifecycle() {
        let engine = engine();
        let now = Utc::now();

        let a = engine.create(vec![item(CAPRESE, 1)], now).unwrap();
        let b = engine.create(vec![item(MARGHERITA, 2)], now).unwrap();
        assert_eq!(reserved(&engine, TOMATOES), 2 + 2);
        assert_eq!(reserved(&engine, MOZZARELLA), 1 + 4);

        engine.release(a.id, now).unwrap();
        assert_eq!(reserved(&engine, TOMATOES), 2);
        assert_eq!(reserved(&engine, MOZZARELLA), 4);

        engine.commit(b.id, now).unwrap();
        assert_eq!(reserved(&engine, TOMATOES), 0);
        assert_eq!(reserved(&engine, MOZZARELLA), 0);
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn materialize_status_is_pure() {
        let now = Utc::now();
        let reservation = Reservation {
            id: 1,
            status: ReservationStatus::Active,
            items: vec![],
            reserved_lines: ReserveLines::new(),
            created_at: now,
            expires_at: now + Duration::seconds(1),
        };
        assert_eq!(
            materialize_status(&reservation, now),
            ReservationStatus::Active
        );
        assert_eq!(
            materialize_status(&reservation, now + Duration::seconds(2)),
            ReservationStatus::Expired
        );
    }
}
