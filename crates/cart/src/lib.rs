//! # Cart
//!
//! A shopping-cart state container with write-through persistence to
//! device-local key-value storage.
//!
//! ## Overview
//!
//! The [`CartStore`] holds an ordered list of line items and offers three
//! mutations plus a read projection:
//!
//! - **`add_to_cart`**: prepend an item with quantity 1 (never merges)
//! - **`increment`**: bump the first line for an id and move it to the front
//! - **`decrement`**: lower the first line for an id, removing it at zero
//! - **`products`**: the current cart, updated before the write completes
//!
//! Every mutation writes the whole cart under one storage key. The store is
//! seeded from that key once when it is opened.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cart::{CartConfig, CartStore, NewCartItem};
//! use cart::backend::SqliteStore;
//!
//! async fn example() -> cart::Result<()> {
//!     let storage = SqliteStore::open("cart.db")?;
//!     let cart = CartStore::open(storage, CartConfig::default()).await?;
//!
//!     cart.add_to_cart(NewCartItem::new("sku-1", "Mug", "img/mug.png", 12.0))
//!         .await?;
//!     cart.increment("sku-1").await?;
//!
//!     assert_eq!(cart.products().quantity_of("sku-1"), 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Mutations are serialized through a single writer, so concurrent calls
//! never lose each other's updates and writes reach storage in order.
//!
//! ## Re-exports
//!
//! - `cart::core` - Line items, the cart list, blob encoding
//! - `cart::backend` - Key-value storage abstraction and SQLite

pub mod context;
pub mod error;
pub mod store;

pub use cart_core as core;
pub use cart_store as backend;

pub use context::{provide, use_cart, CartContext};
pub use error::{CartError, Result};
pub use store::{CartConfig, CartStore, LoadPhase, WritePolicy};

pub use cart_core::{Cart, CartItem, Decrement, NewCartItem, ProductId};
