//! Demo inventory bootstrap
//!
//! Loads a small burger menu so the server is usable out of the box.
//! Only called when both stores are empty.

use shared::models::{Ingredient, MenuItem};

use crate::catalog::Catalog;
use crate::ledger::Ledger;

const BUN: u64 = 1;
const PATTY: u64 = 2;
const LETTUCE: u64 = 3;
const TOMATO: u64 = 4;
const CHEESE: u64 = 5;

pub fn seed_demo_data(ledger: &Ledger, catalog: &Catalog) {
    ledger.insert(Ingredient::new(BUN, "Bun", 40, 8));
    ledger.insert(Ingredient::new(PATTY, "Patty", 30, 6));
    ledger.insert(Ingredient::new(LETTUCE, "Lettuce", 20, 5));
    ledger.insert(Ingredient::new(TOMATO, "Tomato", 20, 5));
    ledger.insert(Ingredient::new(CHEESE, "Cheese", 25, 5));

    catalog.insert(
        MenuItem::new(1, "Classic Burger", 1299)
            .with_ingredient(BUN, 1)
            .with_ingredient(PATTY, 1)
            .with_ingredient(LETTUCE, 1)
            .with_ingredient(TOMATO, 1),
    );
    catalog.insert(
        MenuItem::new(2, "Cheeseburger", 1399)
            .with_ingredient(BUN, 1)
            .with_ingredient(PATTY, 1)
            .with_ingredient(CHEESE, 1),
    );
    catalog.insert(
        MenuItem::new(3, "Veggie Burger", 1199)
            .with_ingredient(BUN, 1)
            .with_ingredient(LETTUCE, 2)
            .with_ingredient(TOMATO, 2),
    );
}
