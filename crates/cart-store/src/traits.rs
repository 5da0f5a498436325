//! KvStore trait: the abstract interface for device-local key-value storage.
//!
//! This trait keeps the cart storage-agnostic. Implementations include
//! SQLite (primary) and in-memory (for tests). The cart only ever touches one
//! key; [`CartBlobExt`] layers the cart blob encoding on top.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use cart_core::{decode_cart, encode_cart, Cart};

use crate::error::Result;

/// Async string-keyed blob store.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, `spawn_blocking` is used internally to avoid blocking the
/// runtime.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently stored, sorted.
    async fn keys(&self) -> Result<Vec<String>>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        (**self).keys().await
    }
}

/// Extension trait reading and writing a whole cart as one blob.
///
/// This is the `{load, save}` persistence capability the cart store is built
/// on; any [`KvStore`] gets it for free.
pub trait CartBlobExt: KvStore {
    /// Load the cart stored under `key`.
    ///
    /// A missing key or an empty value both mean "no cart yet".
    fn load_cart(&self, key: &str) -> impl Future<Output = Result<Option<Cart>>> + Send;

    /// Encode `cart` and store it under `key`.
    fn save_cart(&self, key: &str, cart: &Cart) -> impl Future<Output = Result<()>> + Send;
}

impl<S: KvStore + ?Sized> CartBlobExt for S {
    async fn load_cart(&self, key: &str) -> Result<Option<Cart>> {
        let Some(blob) = self.get(key).await? else {
            return Ok(None);
        };

        if blob.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(decode_cart(&blob)?))
    }

    async fn save_cart(&self, key: &str, cart: &Cart) -> Result<()> {
        let blob = encode_cart(cart)?;
        self.set(key, &blob).await
    }
}
