//! Availability Calculator
//!
//! Pure derivation of per-ingredient and per-menu-item availability from a
//! ledger snapshot and the menu catalog. Holds no state of its own, so it
//! is implicitly recomputed on every read after any ledger or reservation
//! mutation.

use std::collections::BTreeMap;

use shared::models::{Ingredient, MenuItem};
use shared::response::{IngredientView, MenuItemView};
use shared::types::{IngredientId, Qty};

/// Ingredient views with derived `available_qty` / `low_stock` fields
pub fn ingredient_views(ingredients: &[Ingredient]) -> Vec<IngredientView> {
    ingredients
        .iter()
        .map(|ingredient| IngredientView {
            id: ingredient.id,
            name: ingredient.name.clone(),
            on_hand_qty: ingredient.on_hand_qty,
            active_reserved_qty: ingredient.active_reserved_qty,
            available_qty: ingredient.available_qty(),
            low_stock_threshold_qty: ingredient.low_stock_threshold_qty,
            is_out: ingredient.is_out,
            low_stock: ingredient.low_stock(),
        })
        .collect()
}

/// Menu views with derived availability
///
/// Recipe lines are walked in ascending ingredient-id order, so the
/// `reason` string deterministically names the first failing ingredient.
/// Items without a recipe are unconstrained: available with
/// `max_qty_available = None`.
pub fn menu_views(menu_items: &[MenuItem], ingredients: &[Ingredient]) -> Vec<MenuItemView> {
    let by_id: BTreeMap<IngredientId, &Ingredient> =
        ingredients.iter().map(|i| (i.id, i)).collect();

    menu_items
        .iter()
        .map(|item| menu_view(item, &by_id))
        .collect()
}

fn menu_view(item: &MenuItem, ingredients: &BTreeMap<IngredientId, &Ingredient>) -> MenuItemView {
    let mut available = true;
    let mut low_stock = false;
    let mut reason: Option<String> = None;
    let mut max_qty: Option<Qty> = None;

    for (&ingredient_id, &qty_required) in &item.recipe {
        if qty_required == 0 {
            continue;
        }
        let Some(ingredient) = ingredients.get(&ingredient_id) else {
            // Recipe references an ingredient the ledger no longer tracks
            available = false;
            if reason.is_none() {
                reason = Some("Missing ingredient".to_string());
            }
            max_qty = Some(0);
            continue;
        };

        let available_qty = ingredient.available_qty();
        if ingredient.low_stock() {
            low_stock = true;
        }

        let orderable = available_qty / qty_required;
        max_qty = Some(match max_qty {
            Some(current) => current.min(orderable),
            None => orderable,
        });

        if available_qty < qty_required && reason.is_none() {
            available = false;
            reason = Some(format!("Insufficient {}", ingredient.name));
        }
    }

    MenuItemView {
        id: item.id,
        name: item.name.clone(),
        price_cents: item.price_cents,
        available,
        low_stock,
        max_qty_available: max_qty,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(id: IngredientId, name: &str, on_hand: Qty, reserved: Qty) -> Ingredient {
        Ingredient {
            id,
            name: name.to_string(),
            on_hand_qty: on_hand,
            active_reserved_qty: reserved,
            low_stock_threshold_qty: 2,
            is_out: false,
        }
    }

    #[test]
    fn item_without_recipe_is_unlimited() {
        let items = vec![MenuItem::new(1, "Black Coffee", 250)];
        let views = menu_views(&items, &[]);
        assert!(views[0].available);
        assert_eq!(views[0].max_qty_available, None);
        assert_eq!(views[0].reason, None);
    }

    #[test]
    fn max_qty_is_min_over_recipe() {
        let ingredients = vec![
            ingredient(1, "Bun", 10, 0),
            ingredient(2, "Patty", 7, 1), // 6 available / 2 required = 3
        ];
        let items = vec![
            MenuItem::new(1, "Double Burger", 1500)
                .with_ingredient(1, 1)
                .with_ingredient(2, 2),
        ];
        let views = menu_views(&items, &ingredients);
        assert!(views[0].available);
        assert_eq!(views[0].max_qty_available, Some(3));
    }

    #[test]
    fn reason_names_first_failing_ingredient_by_id() {
        let mut short_cheese = ingredient(3, "Cheese", 0, 0);
        short_cheese.low_stock_threshold_qty = 0;
        let ingredients = vec![
            ingredient(1, "Bun", 0, 0),
            ingredient(2, "Patty", 5, 0),
            short_cheese,
        ];
        let items = vec![
            MenuItem::new(1, "Cheeseburger", 1399)
                .with_ingredient(3, 1)
                .with_ingredient(2, 1)
                .with_ingredient(1, 1),
        ];
        let views = menu_views(&items, &ingredients);
        assert!(!views[0].available);
        assert_eq!(views[0].max_qty_available, Some(0));
        // Bun (id 1) fails first even though Cheese (id 3) is also short
        assert_eq!(views[0].reason.as_deref(), Some("Insufficient Bun"));
    }

    #[test]
    fn out_ingredient_makes_item_unavailable() {
        let mut lettuce = ingredient(1, "Lettuce", 10, 0);
        lettuce.is_out = true;
        let items = vec![MenuItem::new(1, "Side Salad", 700).with_ingredient(1, 1)];
        let views = menu_views(&items, &[lettuce]);
        assert!(!views[0].available);
        assert_eq!(views[0].max_qty_available, Some(0));
        assert_eq!(views[0].reason.as_deref(), Some("Insufficient Lettuce"));
    }

    #[test]
    fn low_stock_propagates_from_any_recipe_ingredient() {
        let ingredients = vec![ingredient(1, "Bun", 3, 1)]; // 2 available == threshold
        let items = vec![MenuItem::new(1, "Classic Burger", 1299).with_ingredient(1, 1)];
        let views = menu_views(&items, &ingredients);
        assert!(views[0].available);
        assert!(views[0].low_stock);
    }

    #[test]
    fn ingredient_views_carry_derived_fields() {
        let views = ingredient_views(&[ingredient(1, "Tomato", 20, 15)]);
        assert_eq!(views[0].available_qty, 5);
        assert!(!views[0].low_stock);
        assert_eq!(views[0].active_reserved_qty, 15);
    }
}
