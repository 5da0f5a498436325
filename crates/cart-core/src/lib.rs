//! # Cart Core
//!
//! Pure primitives for the cart store: line items, the cart list and its
//! mutations, and the blob encoding used for persistence.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over an ordered list of line items.
//!
//! ## Key Types
//!
//! - [`CartItem`] - One product line with its quantity
//! - [`NewCartItem`] - An item offered to the cart, before it has a quantity
//! - [`Cart`] - Ordered list of lines with `add`, `increment`, `decrement`
//! - [`ProductId`] - Product identifier newtype
//!
//! ## Encoding
//!
//! Carts persist as a JSON array. See [`codec`] module.

pub mod cart;
pub mod codec;
pub mod error;
pub mod item;
pub mod types;
pub mod validation;

pub use cart::{Cart, Decrement};
pub use codec::{decode_cart, decode_items, encode_cart, encode_items, DEFAULT_CART_KEY};
pub use error::{CoreError, Result, ValidationError};
pub use item::{CartItem, NewCartItem};
pub use types::ProductId;
pub use validation::{validate_cart, validate_new_item};
