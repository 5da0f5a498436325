//! # Cart Testkit
//!
//! Testing utilities for the cart store.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known carts with their exact encoded blobs
//! - **Generators**: Proptest strategies for items and operation sequences
//! - **Fixtures**: A small product catalog and pre-seeded stores
//! - **Doubles**: Storage backends that fail, block, or record
//!
//! ## Golden Vectors
//!
//! ```rust
//! use cart_testkit::vectors::verify_all_vectors;
//!
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cart_core::Cart;
//! use cart_testkit::generators::cart_ops;
//!
//! proptest! {
//!     #[test]
//!     fn quantities_stay_positive(ops in cart_ops(32)) {
//!         let mut cart = Cart::new();
//!         for op in &ops {
//!             op.apply(&mut cart);
//!         }
//!         prop_assert!(cart.iter().all(|item| item.quantity >= 1));
//!     }
//! }
//! ```
//!
//! ## Storage Doubles
//!
//! ```rust
//! use cart_testkit::fixtures::{line, seeded_store};
//!
//! let store = seeded_store(&[line("mug", 2)]);
//! assert_eq!(store.len(), 1);
//! ```

pub mod doubles;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use doubles::{FailingStore, GatedStore, RecordingStore};
pub use fixtures::{catalog, line, product, seeded_store, seeded_store_at};
pub use generators::{cart_ops, CartOp};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
