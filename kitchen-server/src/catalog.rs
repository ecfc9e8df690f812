//! Menu catalog
//!
//! Menu items and their recipes. Menu CRUD lives outside this core; the
//! catalog is read by the availability calculator and by recipe expansion
//! in the reservation engine.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use shared::models::MenuItem;
use shared::types::MenuItemId;

/// Read-mostly menu item store
#[derive(Debug, Default)]
pub struct Catalog {
    inner: RwLock<BTreeMap<MenuItemId, MenuItem>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: MenuItem) {
        self.inner.write().insert(item.id, item);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn get(&self, id: MenuItemId) -> Option<MenuItem> {
        self.inner.read().get(&id).cloned()
    }

    /// Snapshot of every menu item, ordered by id
    pub fn snapshot(&self) -> Vec<MenuItem> {
        self.inner.read().values().cloned().collect()
    }
}
