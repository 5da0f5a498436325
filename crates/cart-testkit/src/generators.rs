//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cart_core::{Cart, CartItem, NewCartItem, ProductId};

/// Generate a product id from a small pool, so sequences revisit ids and
/// produce duplicate lines.
pub fn product_id() -> impl Strategy<Value = ProductId> {
    prop_oneof![Just("a"), Just("b"), Just("c"), Just("d"), Just("e")].prop_map(ProductId::from)
}

/// Generate a unit price.
pub fn price() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|cents| f64::from(cents) / 100.0)
}

/// Generate an item offered to the cart.
pub fn new_cart_item() -> impl Strategy<Value = NewCartItem> {
    (product_id(), "[A-Za-z ]{0,16}", "[a-z/.:]{0,24}", price()).prop_map(
        |(id, title, image_url, price)| NewCartItem {
            id,
            title,
            image_url,
            price,
        },
    )
}

/// Generate a line item with quantity at least 1.
pub fn cart_item() -> impl Strategy<Value = CartItem> {
    (new_cart_item(), 1u32..50).prop_map(|(item, quantity)| {
        let mut line = item.into_line_item();
        line.quantity = quantity;
        line
    })
}

/// Generate a list of line items.
pub fn cart_items(max_len: usize) -> impl Strategy<Value = Vec<CartItem>> {
    prop::collection::vec(cart_item(), 0..=max_len)
}

/// One cart operation.
#[derive(Debug, Clone)]
pub enum CartOp {
    Add(NewCartItem),
    Increment(ProductId),
    Decrement(ProductId),
}

impl CartOp {
    /// The id this operation targets.
    pub fn id(&self) -> &ProductId {
        match self {
            CartOp::Add(item) => &item.id,
            CartOp::Increment(id) | CartOp::Decrement(id) => id,
        }
    }

    /// Apply to `cart`. Returns whether the cart changed.
    pub fn apply(&self, cart: &mut Cart) -> bool {
        match self {
            CartOp::Add(item) => {
                cart.add(item.clone());
                true
            }
            CartOp::Increment(id) => cart.increment(id.as_str()).is_ok(),
            CartOp::Decrement(id) => cart.decrement(id.as_str()).is_ok(),
        }
    }
}

/// Generate a single operation.
pub fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        new_cart_item().prop_map(CartOp::Add),
        product_id().prop_map(CartOp::Increment),
        product_id().prop_map(CartOp::Decrement),
    ]
}

/// Generate a sequence of operations.
pub fn cart_ops(max_len: usize) -> impl Strategy<Value = Vec<CartOp>> {
    prop::collection::vec(cart_op(), 0..=max_len)
}
