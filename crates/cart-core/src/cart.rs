//! Cart: an ordered list of line items and the three mutations on it.
//!
//! Every mutation moves the affected line to the front; the remaining lines
//! keep their relative order. This is pure computation with no I/O; the
//! persistence side lives in `cart-store` and the `cart` facade.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::item::{CartItem, NewCartItem};
use crate::types::ProductId;

/// Ordered list of line items, most recently mutated first.
///
/// Ids are unique except when the same product is added twice: `add` never
/// merges, so a second add of an id produces a second line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

/// What a decrement did to the line it touched.
#[derive(Debug, Clone, PartialEq)]
pub enum Decrement {
    /// The line is still present, now with this quantity, at the front.
    Decremented { quantity: u32 },
    /// The line reached zero and was removed.
    Removed(CartItem),
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from an already ordered list.
    ///
    /// The list is taken as-is; see [`validate_cart`](crate::validate_cart)
    /// for checking a list that came from storage.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// The lines in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning its lines.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First line for the given product, if any.
    pub fn find(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.is(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Units of a product across all of its lines.
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.items
            .iter()
            .filter(|item| item.is(id))
            .map(|item| item.quantity)
            .sum()
    }

    /// Units across the whole cart.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add an item with quantity 1 at the front of the cart.
    ///
    /// An existing line for the same product is left alone; the cart then
    /// holds two lines for that id.
    pub fn add(&mut self, item: NewCartItem) -> &CartItem {
        self.items.insert(0, item.into_line_item());
        &self.items[0]
    }

    /// Increase the first line for `id` by one and move it to the front.
    ///
    /// A line already at `u32::MAX` fails with
    /// [`CoreError::QuantityOverflow`] and the cart is left untouched.
    pub fn increment(&mut self, id: &str) -> Result<&CartItem> {
        let index = self.position(id)?;
        let quantity = self.items[index]
            .quantity
            .checked_add(1)
            .ok_or_else(|| CoreError::QuantityOverflow(self.items[index].id.clone()))?;

        let mut item = self.items.remove(index);
        item.quantity = quantity;
        self.items.insert(0, item);
        Ok(&self.items[0])
    }

    /// Decrease the first line for `id` by one.
    ///
    /// At zero the line is removed rather than kept with quantity 0.
    /// Otherwise it moves to the front.
    pub fn decrement(&mut self, id: &str) -> Result<Decrement> {
        let index = self.position(id)?;
        let mut item = self.items.remove(index);
        item.quantity = item.quantity.saturating_sub(1);

        if item.quantity == 0 {
            return Ok(Decrement::Removed(item));
        }

        let quantity = item.quantity;
        self.items.insert(0, item);
        Ok(Decrement::Decremented { quantity })
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.is(id))
            .ok_or_else(|| CoreError::ItemNotFound(ProductId::from(id)))
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: &str) -> NewCartItem {
        NewCartItem::new(id, id.to_uppercase(), "u", 10.0)
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.iter().map(|item| item.id.as_str()).collect()
    }

    fn quantities(cart: &Cart) -> Vec<u32> {
        cart.iter().map(|item| item.quantity).collect()
    }

    #[test]
    fn test_add_increment_decrement_scenario() {
        let mut cart = Cart::new();

        cart.add(NewCartItem::new("a", "A", "u", 10.0));
        assert_eq!(ids(&cart), vec!["a"]);
        assert_eq!(quantities(&cart), vec![1]);

        cart.increment("a").unwrap();
        assert_eq!(quantities(&cart), vec![2]);

        assert_eq!(
            cart.decrement("a").unwrap(),
            Decrement::Decremented { quantity: 1 }
        );
        assert_eq!(quantities(&cart), vec![1]);

        assert!(matches!(cart.decrement("a").unwrap(), Decrement::Removed(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_prepends() {
        let mut cart = Cart::new();
        cart.add(offer("a"));
        cart.add(offer("b"));
        cart.add(offer("c"));
        assert_eq!(ids(&cart), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_add_same_id_twice_creates_two_lines() {
        let mut cart = Cart::new();
        cart.add(offer("p1"));
        cart.add(offer("p1"));

        assert_eq!(cart.len(), 2);
        assert_eq!(ids(&cart), vec!["p1", "p1"]);
        assert_eq!(quantities(&cart), vec![1, 1]);
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_increment_touches_first_duplicate_only() {
        let mut cart = Cart::from_items(vec![
            CartItem::new("x", "X", "u", 1.0, 1),
            CartItem::new("p1", "first", "u", 1.0, 1),
            CartItem::new("p1", "second", "u", 1.0, 5),
        ]);

        cart.increment("p1").unwrap();

        let titles: Vec<_> = cart.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "X", "second"]);
        assert_eq!(quantities(&cart), vec![2, 1, 5]);
    }

    #[test]
    fn test_mutation_moves_to_front_preserving_order() {
        let mut cart = Cart::new();
        for id in ["a", "b", "c", "d"] {
            cart.add(offer(id));
        }
        // d c b a
        cart.increment("b").unwrap();
        assert_eq!(ids(&cart), vec!["b", "d", "c", "a"]);

        cart.increment("a").unwrap();
        cart.decrement("a").unwrap();
        assert_eq!(ids(&cart), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_decrement_removal_keeps_order() {
        let mut cart = Cart::new();
        for id in ["a", "b", "c"] {
            cart.add(offer(id));
        }
        // c b a
        let removed = cart.decrement("b").unwrap();
        assert!(matches!(removed, Decrement::Removed(item) if item.id == "b"));
        assert_eq!(ids(&cart), vec!["c", "a"]);
    }

    #[test]
    fn test_increment_after_removal_is_not_found() {
        let mut cart = Cart::new();
        cart.add(offer("a"));
        cart.decrement("a").unwrap();

        let err = cart.increment("a").unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound(id) if id == "a"));
    }

    #[test]
    fn test_missing_id_leaves_cart_untouched() {
        let mut cart = Cart::new();
        cart.add(offer("a"));
        let before = cart.clone();

        assert!(cart.increment("zzz").is_err());
        assert!(cart.decrement("zzz").is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_zero_quantity_line_removes_it() {
        // Loaded blobs are not validated, so a zero line can exist.
        let mut cart = Cart::from_items(vec![CartItem::new("a", "A", "u", 1.0, 0)]);
        assert!(matches!(cart.decrement("a").unwrap(), Decrement::Removed(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_is_not_touched_by_mutations() {
        let mut cart = Cart::new();
        cart.add(NewCartItem::new("a", "A", "u", 19.99));
        cart.increment("a").unwrap();
        cart.increment("a").unwrap();
        cart.decrement("a").unwrap();
        assert_eq!(cart.find("a").unwrap().price, 19.99);
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        cart.add(offer("a"));
        cart.add(offer("b"));
        cart.increment("a").unwrap();
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(Cart::new().total_quantity(), 0);
    }

    #[test]
    fn test_increment_at_max_quantity_fails_and_leaves_cart() {
        let mut cart = Cart::from_items(vec![
            CartItem::new("a", "A", "u", 1.0, 1),
            CartItem::new("b", "B", "u", 1.0, u32::MAX),
        ]);
        let before = cart.clone();

        let err = cart.increment("b").unwrap_err();
        assert!(matches!(err, CoreError::QuantityOverflow(id) if id == "b"));
        assert_eq!(cart, before);
    }
}
