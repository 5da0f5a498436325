//! Test fixtures and helpers.
//!
//! Common setup code for cart tests.

use cart_core::{encode_items, CartItem, NewCartItem, DEFAULT_CART_KEY};
use cart_store::MemoryStore;

/// A small catalog of distinct products.
pub fn catalog() -> Vec<NewCartItem> {
    vec![
        NewCartItem::new("mug", "Enamel Mug", "https://img.example/mug.png", 12.0),
        NewCartItem::new("tee", "Logo Tee", "https://img.example/tee.png", 24.5),
        NewCartItem::new("cap", "Trucker Cap", "https://img.example/cap.png", 18.0),
        NewCartItem::new("pin", "Enamel Pin", "https://img.example/pin.png", 4.99),
    ]
}

/// A catalog item by id, or a generic one if the id isn't in the catalog.
pub fn product(id: &str) -> NewCartItem {
    catalog()
        .into_iter()
        .find(|item| item.id == id)
        .unwrap_or_else(|| NewCartItem::new(id, id.to_uppercase(), "https://img.example/x.png", 1.0))
}

/// A line item with the given quantity.
pub fn line(id: &str, quantity: u32) -> CartItem {
    let mut item = product(id).into_line_item();
    item.quantity = quantity;
    item
}

/// A memory store holding `items` under the default cart key.
pub fn seeded_store(items: &[CartItem]) -> MemoryStore {
    seeded_store_at(DEFAULT_CART_KEY, items)
}

/// A memory store holding `items` under `key`.
pub fn seeded_store_at(key: &str, items: &[CartItem]) -> MemoryStore {
    let blob = encode_items(items).unwrap_or_else(|_| "[]".to_string());
    MemoryStore::with_entries([(key.to_string(), blob)])
}
