//! Menu item model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{IngredientId, MenuItemId, Qty};

/// Menu item with its ingredient recipe
///
/// `recipe` maps ingredient id to the quantity one unit of this item
/// consumes. An empty recipe means the item is not stock-constrained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price_cents: u32,
    #[serde(default)]
    pub recipe: BTreeMap<IngredientId, Qty>,
}

impl MenuItem {
    pub fn new(id: MenuItemId, name: impl Into<String>, price_cents: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price_cents,
            recipe: BTreeMap::new(),
        }
    }

    /// Add a recipe line (ingredient consumed per unit ordered)
    pub fn with_ingredient(mut self, ingredient_id: IngredientId, qty_required: Qty) -> Self {
        self.recipe.insert(ingredient_id, qty_required);
        self
    }
}
