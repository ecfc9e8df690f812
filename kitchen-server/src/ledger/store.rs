//! Ledger store and transaction interface

use std::collections::BTreeMap;

use parking_lot::RwLock;
use shared::error::IngredientShortfall;
use shared::models::Ingredient;
use shared::types::{IngredientId, Qty};
use thiserror::Error;

/// Recipe-expanded ingredient requirements, keyed by ingredient id
///
/// BTreeMap keeps iteration (and therefore shortfall reporting) in
/// ascending ingredient-id order.
pub type ReserveLines = BTreeMap<IngredientId, Qty>;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(IngredientId),

    /// One or more ingredients cannot cover the requested quantities.
    /// Carries every shortfall, not just the first.
    #[error("Insufficient stock for {} ingredient(s)", .0.len())]
    InsufficientStock(Vec<IngredientShortfall>),
}

/// The authoritative per-ingredient stock record
///
/// All mutations take the write lock exactly once and either apply fully
/// or not at all. Reads hand out cloned snapshots so callers never hold
/// the lock across derived computations.
#[derive(Debug, Default)]
pub struct Ledger {
    inner: RwLock<BTreeMap<IngredientId, Ingredient>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ingredient (seed / test setup)
    pub fn insert(&self, ingredient: Ingredient) {
        self.inner.write().insert(ingredient.id, ingredient);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn get(&self, id: IngredientId) -> Option<Ingredient> {
        self.inner.read().get(&id).cloned()
    }

    /// Snapshot of every ingredient, ordered by id
    pub fn snapshot(&self) -> Vec<Ingredient> {
        self.inner.read().values().cloned().collect()
    }

    /// Kitchen stock edit: set the on-hand quantity and/or the out flag
    pub fn update_stock(
        &self,
        id: IngredientId,
        on_hand_qty: Option<Qty>,
        is_out: Option<bool>,
    ) -> Result<Ingredient, LedgerError> {
        let mut inner = self.inner.write();
        let ingredient = inner
            .get_mut(&id)
            .ok_or(LedgerError::IngredientNotFound(id))?;
        if let Some(qty) = on_hand_qty {
            ingredient.on_hand_qty = qty;
        }
        if let Some(out) = is_out {
            ingredient.is_out = out;
        }
        Ok(ingredient.clone())
    }

    /// Place a hold on every line, all-or-nothing
    ///
    /// Validates each ingredient against `on_hand - active_reserved` (zero
    /// when `is_out`) before touching anything; on any shortfall nothing is
    /// mutated and the full shortfall list comes back in ascending
    /// ingredient-id order.
    pub fn reserve(&self, lines: &ReserveLines) -> Result<(), LedgerError> {
        let mut inner = self.inner.write();

        let mut shortfalls = Vec::new();
        for (&id, &required_qty) in lines {
            let ingredient = inner.get(&id).ok_or(LedgerError::IngredientNotFound(id))?;
            let available_qty = ingredient.available_qty();
            if available_qty < required_qty {
                shortfalls.push(IngredientShortfall::new(
                    id,
                    ingredient.name.clone(),
                    required_qty,
                    available_qty,
                    ingredient.is_out,
                ));
            }
        }
        if !shortfalls.is_empty() {
            return Err(LedgerError::InsufficientStock(shortfalls));
        }

        for (&id, &required_qty) in lines {
            if let Some(ingredient) = inner.get_mut(&id) {
                ingredient.active_reserved_qty += required_qty;
            }
        }
        Ok(())
    }

    /// Drop a hold
    ///
    /// Never fails: unknown ingredients are skipped and decrements floor at
    /// zero, so releasing the same lines twice is harmless.
    pub fn release(&self, lines: &ReserveLines) {
        let mut inner = self.inner.write();
        for (&id, &qty) in lines {
            if let Some(ingredient) = inner.get_mut(&id) {
                ingredient.active_reserved_qty = ingredient.active_reserved_qty.saturating_sub(qty);
            }
        }
    }

    /// Convert a hold into permanent consumption
    ///
    /// Decrements `on_hand_qty` and `active_reserved_qty` by the same
    /// amounts in one atomic step; net available quantity is unchanged.
    pub fn commit(&self, lines: &ReserveLines) {
        let mut inner = self.inner.write();
        for (&id, &qty) in lines {
            if let Some(ingredient) = inner.get_mut(&id) {
                ingredient.on_hand_qty = ingredient.on_hand_qty.saturating_sub(qty);
                ingredient.active_reserved_qty = ingredient.active_reserved_qty.saturating_sub(qty);
            }
        }
    }

    /// Replace one hold with another, all-or-nothing
    ///
    /// Used by reservation modify: the new lines are validated against
    /// availability *as if the old hold were already released*, and on
    /// success the old hold is dropped and the new one applied in the same
    /// write-lock scope. On shortfall nothing changes and the reported
    /// `available_qty` includes the caller's own prior hold.
    pub fn swap(&self, old: &ReserveLines, new: &ReserveLines) -> Result<(), LedgerError> {
        let mut inner = self.inner.write();

        let mut shortfalls = Vec::new();
        for (&id, &required_qty) in new {
            let ingredient = inner.get(&id).ok_or(LedgerError::IngredientNotFound(id))?;
            let own_hold = old.get(&id).copied().unwrap_or(0);
            let available_qty = if ingredient.is_out {
                0
            } else {
                (ingredient.on_hand_qty + own_hold).saturating_sub(ingredient.active_reserved_qty)
            };
            if available_qty < required_qty {
                shortfalls.push(IngredientShortfall::new(
                    id,
                    ingredient.name.clone(),
                    required_qty,
                    available_qty,
                    ingredient.is_out,
                ));
            }
        }
        if !shortfalls.is_empty() {
            return Err(LedgerError::InsufficientStock(shortfalls));
        }

        for (&id, &qty) in old {
            if let Some(ingredient) = inner.get_mut(&id) {
                ingredient.active_reserved_qty = ingredient.active_reserved_qty.saturating_sub(qty);
            }
        }
        for (&id, &qty) in new {
            if let Some(ingredient) = inner.get_mut(&id) {
                ingredient.active_reserved_qty += qty;
            }
        }
        Ok(())
    }

    /// Total actively reserved quantity per ingredient (test / audit view)
    pub fn active_reserved(&self, id: IngredientId) -> Option<Qty> {
        self.inner.read().get(&id).map(|i| i.active_reserved_qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(entries: &[(IngredientId, &str, Qty)]) -> Ledger {
        let ledger = Ledger::new();
        for &(id, name, on_hand) in entries {
            ledger.insert(Ingredient {
                id,
                name: name.to_string(),
                on_hand_qty: on_hand,
                active_reserved_qty: 0,
                low_stock_threshold_qty: 0,
                is_out: false,
            });
        }
        ledger
    }

    fn lines(entries: &[(IngredientId, Qty)]) -> ReserveLines {
        entries.iter().copied().collect()
    }

    #[test]
    fn reserve_increments_reserved() {
        let ledger = ledger_with(&[(1, "Bun", 10), (2, "Patty", 10)]);
        ledger.reserve(&lines(&[(1, 4), (2, 2)])).unwrap();
        assert_eq!(ledger.active_reserved(1), Some(4));
        assert_eq!(ledger.active_reserved(2), Some(2));
    }

    #[test]
    fn reserve_is_all_or_nothing() {
        let ledger = ledger_with(&[(1, "Bun", 10), (2, "Patty", 1)]);
        let err = ledger.reserve(&lines(&[(1, 4), (2, 2)])).unwrap_err();
        match err {
            LedgerError::InsufficientStock(shortfalls) => {
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].ingredient_name, "Patty");
                assert_eq!(shortfalls[0].required_qty, 2);
                assert_eq!(shortfalls[0].available_qty, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Nothing was applied, including the valid line
        assert_eq!(ledger.active_reserved(1), Some(0));
        assert_eq!(ledger.active_reserved(2), Some(0));
    }

    #[test]
    fn reserve_fails_when_out_even_with_stock() {
        let ledger = ledger_with(&[(1, "Lettuce", 10)]);
        ledger.update_stock(1, None, Some(true)).unwrap();
        let err = ledger.reserve(&lines(&[(1, 1)])).unwrap_err();
        match err {
            LedgerError::InsufficientStock(shortfalls) => {
                assert!(shortfalls[0].is_out);
                assert_eq!(shortfalls[0].available_qty, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn shortfalls_are_ordered_by_ingredient_id() {
        let ledger = ledger_with(&[(3, "Cheese", 0), (7, "Bacon", 0), (1, "Bun", 0)]);
        let err = ledger
            .reserve(&lines(&[(7, 1), (1, 1), (3, 1)]))
            .unwrap_err();
        match err {
            LedgerError::InsufficientStock(shortfalls) => {
                let ids: Vec<_> = shortfalls.iter().map(|s| s.ingredient_id).collect();
                assert_eq!(ids, vec![1, 3, 7]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn release_floors_at_zero() {
        let ledger = ledger_with(&[(1, "Bun", 10)]);
        ledger.reserve(&lines(&[(1, 3)])).unwrap();
        ledger.release(&lines(&[(1, 3)]));
        ledger.release(&lines(&[(1, 3)]));
        assert_eq!(ledger.active_reserved(1), Some(0));
    }

    #[test]
    fn commit_consumes_on_hand_and_reserved_together() {
        let ledger = ledger_with(&[(1, "Patty", 10)]);
        ledger.reserve(&lines(&[(1, 2)])).unwrap();
        let available_before = ledger.get(1).unwrap().available_qty();

        ledger.commit(&lines(&[(1, 2)]));
        let ingredient = ledger.get(1).unwrap();
        assert_eq!(ingredient.on_hand_qty, 8);
        assert_eq!(ingredient.active_reserved_qty, 0);
        assert_eq!(ingredient.available_qty(), available_before);
        assert_eq!(ingredient.available_qty(), 8);
    }

    #[test]
    fn swap_counts_own_hold_as_available() {
        // 5 on hand, all of it held by this reservation
        let ledger = ledger_with(&[(1, "Bun", 5)]);
        let old = lines(&[(1, 5)]);
        ledger.reserve(&old).unwrap();

        // Replacing within the freed hold succeeds even at zero availability
        ledger.swap(&old, &lines(&[(1, 4)])).unwrap();
        assert_eq!(ledger.active_reserved(1), Some(4));
    }

    #[test]
    fn swap_failure_keeps_old_hold() {
        let ledger = ledger_with(&[(1, "Bun", 5), (2, "Patty", 1)]);
        let old = lines(&[(1, 2)]);
        ledger.reserve(&old).unwrap();

        let err = ledger.swap(&old, &lines(&[(1, 3), (2, 4)])).unwrap_err();
        match err {
            LedgerError::InsufficientStock(shortfalls) => {
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].ingredient_id, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ledger.active_reserved(1), Some(2));
        assert_eq!(ledger.active_reserved(2), Some(0));
    }

    #[test]
    fn reserve_unknown_ingredient_is_an_error() {
        let ledger = ledger_with(&[(1, "Bun", 10)]);
        let err = ledger.reserve(&lines(&[(9, 1)])).unwrap_err();
        assert!(matches!(err, LedgerError::IngredientNotFound(9)));
    }
}
