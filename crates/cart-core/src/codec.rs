//! Blob encoding for persisted carts.
//!
//! A cart is stored as a JSON array of line objects in display order:
//!
//! ```text
//! [{"id":"a","title":"A","image_url":"u","price":10.0,"quantity":2}, ...]
//! ```
//!
//! The format carries no version tag. Decoding accepts `imageUrl` in place of
//! `image_url` and ignores unknown fields.

use crate::cart::Cart;
use crate::error::{CoreError, Result};
use crate::item::CartItem;

/// Storage key under which the cart blob lives unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "Products";

/// Encode a list of line items into the blob format.
pub fn encode_items(items: &[CartItem]) -> Result<String> {
    serde_json::to_string(items).map_err(|e| CoreError::Encoding(e.to_string()))
}

/// Decode a blob into a list of line items, preserving order.
pub fn decode_items(blob: &str) -> Result<Vec<CartItem>> {
    serde_json::from_str(blob).map_err(|e| CoreError::Decoding(e.to_string()))
}

/// Encode a whole cart.
pub fn encode_cart(cart: &Cart) -> Result<String> {
    encode_items(cart.items())
}

/// Decode a whole cart.
pub fn decode_cart(blob: &str) -> Result<Cart> {
    decode_items(blob).map(Cart::from_items)
}
