//! Consumer access to the cart.
//!
//! Consumers normally receive a [`CartStore`] clone directly. For code that
//! can't thread a handle through, [`provide`] installs a [`CartContext`] for
//! the duration of a future and [`use_cart`] looks it up. The lookup only
//! succeeds inside a provider scope; a task spawned from inside the scope is
//! outside it unless it is provided again.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use cart_core::{Cart, CartItem, Decrement, NewCartItem};
use cart_store::KvStore;

use crate::error::{CartError, Result};
use crate::store::CartStore;

/// The capability set a cart consumer sees: the read projection and the
/// three mutations.
#[async_trait]
pub trait CartContext: Send + Sync {
    /// The current cart.
    fn products(&self) -> Arc<Cart>;

    /// Add an item with quantity 1 at the front of the cart.
    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem>;

    /// Increase the first line for `id` by one.
    async fn increment(&self, id: &str) -> Result<CartItem>;

    /// Decrease the first line for `id` by one, removing it at zero.
    async fn decrement(&self, id: &str) -> Result<Decrement>;
}

#[async_trait]
impl<S: KvStore + 'static> CartContext for CartStore<S> {
    fn products(&self) -> Arc<Cart> {
        CartStore::products(self)
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem> {
        CartStore::add_to_cart(self, item).await
    }

    async fn increment(&self, id: &str) -> Result<CartItem> {
        CartStore::increment(self, id).await
    }

    async fn decrement(&self, id: &str) -> Result<Decrement> {
        CartStore::decrement(self, id).await
    }
}

impl<S: KvStore + 'static> CartStore<S> {
    /// Type-erase this store into a shareable context.
    pub fn into_context(self) -> Arc<dyn CartContext> {
        Arc::new(self)
    }
}

tokio::task_local! {
    static CURRENT_CART: Arc<dyn CartContext>;
}

/// Run `f` with `cart` as the current cart.
///
/// Scopes nest; the innermost provider wins.
pub async fn provide<F>(cart: Arc<dyn CartContext>, f: F) -> F::Output
where
    F: Future,
{
    CURRENT_CART.scope(cart, f).await
}

/// Look up the current cart.
///
/// Fails with [`CartError::OutsideScope`] when called outside [`provide`].
pub fn use_cart() -> Result<Arc<dyn CartContext>> {
    CURRENT_CART
        .try_with(Arc::clone)
        .map_err(|_| CartError::OutsideScope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CartConfig;
    use cart_store::MemoryStore;

    async fn context() -> Arc<dyn CartContext> {
        CartStore::open(MemoryStore::new(), CartConfig::default())
            .await
            .unwrap()
            .into_context()
    }

    #[tokio::test]
    async fn test_use_cart_outside_scope_fails() {
        assert!(matches!(use_cart(), Err(CartError::OutsideScope)));
    }

    #[tokio::test]
    async fn test_use_cart_inside_scope() {
        let cart = context().await;

        provide(Arc::clone(&cart), async {
            let ctx = use_cart().unwrap();
            ctx.add_to_cart(NewCartItem::new("a", "A", "u", 1.0))
                .await
                .unwrap();
            ctx.increment("a").await.unwrap();
        })
        .await;

        assert_eq!(cart.products().total_quantity(), 2);
        assert!(use_cart().is_err());
    }

    #[tokio::test]
    async fn test_inner_scope_shadows_outer() {
        let outer = context().await;
        let inner = context().await;

        provide(Arc::clone(&outer), async {
            provide(Arc::clone(&inner), async {
                use_cart()
                    .unwrap()
                    .add_to_cart(NewCartItem::new("x", "X", "u", 1.0))
                    .await
                    .unwrap();
            })
            .await;

            assert!(use_cart().unwrap().products().is_empty());
        })
        .await;

        assert_eq!(inner.products().len(), 1);
        assert!(outer.products().is_empty());
    }

    #[tokio::test]
    async fn test_spawned_task_is_outside_scope() {
        let cart = context().await;

        let result = provide(cart, async {
            tokio::spawn(async { use_cart().is_err() }).await.unwrap()
        })
        .await;

        assert!(result);
    }
}
