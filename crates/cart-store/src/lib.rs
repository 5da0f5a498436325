//! # Cart Store Backends
//!
//! Storage abstraction for the cart. Provides a trait-based interface for
//! device-local key-value persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The [`KvStore`] trait is a string-keyed blob store: `get`, `set`,
//! `remove`. The cart keeps its whole line list under a single key; the
//! [`CartBlobExt`] extension encodes and decodes that blob.
//!
//! ## Key Types
//!
//! - [`KvStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`CartBlobExt`] - `load_cart` / `save_cart` on any store
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cart_store::{CartBlobExt, SqliteStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("cart.db").unwrap();
//!
//!     if let Some(cart) = store.load_cart("Products").await.unwrap() {
//!         println!("{} lines", cart.len());
//!     }
//! }
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{CartBlobExt, KvStore};

/// Get current time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
