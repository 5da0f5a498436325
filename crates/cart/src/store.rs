//! The Cart Store: in-memory cart state with write-through persistence.
//!
//! All mutations go through one writer lock that is held across computing
//! the new cart, publishing it, and persisting it. A mutation therefore
//! always starts from the latest cart and writes reach storage in mutation
//! order. Readers never wait on the writer: snapshots are published on a
//! watch channel as soon as they are computed, before the write completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cart_core::{
    validate_cart, validate_new_item, Cart, CartItem, Decrement, NewCartItem, DEFAULT_CART_KEY,
};
use cart_store::{CartBlobExt, KvStore};
use tokio::sync::{watch, Mutex};

use crate::error::{CartError, Result};

/// What to do when the backing store fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Log the failure and carry on. In-memory and persisted state may
    /// diverge until the next successful write.
    #[default]
    BestEffort,
    /// Return the failure to the caller. The in-memory mutation has already
    /// been published and is not rolled back.
    Strict,
}

/// Configuration for the Cart Store.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Key the cart blob is stored under.
    pub storage_key: String,
    /// Handling of storage failures.
    pub write_policy: WritePolicy,
    /// Whether to validate a loaded blob before adopting it.
    pub validate_on_load: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            write_policy: WritePolicy::BestEffort,
            validate_on_load: false,
        }
    }
}

impl CartConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn with_validate_on_load(mut self, validate: bool) -> Self {
        self.validate_on_load = validate;
        self
    }
}

/// Whether the initial read from storage has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No load has run yet.
    Pending,
    /// The initial load finished (with or without a stored cart).
    Loaded,
}

/// The Cart Store.
///
/// Cheap to clone; clones share the same cart and writer. Hand a clone to
/// each consumer, or wrap it as a [`CartContext`](crate::CartContext) for
/// scoped lookup.
pub struct CartStore<S: KvStore> {
    store: Arc<S>,
    config: Arc<CartConfig>,
    shared: Arc<Shared>,
}

struct Shared {
    /// Single-writer serialization point.
    writer: Mutex<WriterState>,
    /// Latest published cart.
    snapshot: watch::Sender<Arc<Cart>>,
    /// Mirror of `WriterState::phase` for lock-free reads.
    loaded: AtomicBool,
}

struct WriterState {
    phase: LoadPhase,
    /// Mutations applied so far.
    mutations: u64,
}

impl<S: KvStore> Clone for CartStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: KvStore> CartStore<S> {
    /// Create an empty, not yet loaded cart store.
    pub fn new(store: S, config: CartConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create a cart store over a store handle shared with other owners.
    pub fn with_shared_store(store: Arc<S>, config: CartConfig) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Cart::new()));
        Self {
            store,
            config: Arc::new(config),
            shared: Arc::new(Shared {
                writer: Mutex::new(WriterState {
                    phase: LoadPhase::Pending,
                    mutations: 0,
                }),
                snapshot,
                loaded: AtomicBool::new(false),
            }),
        }
    }

    /// Create a cart store and run the initial load.
    pub async fn open(store: S, config: CartConfig) -> Result<Self> {
        let cart = Self::new(store, config);
        cart.load().await?;
        Ok(cart)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Get the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> LoadPhase {
        if self.shared.loaded.load(Ordering::Acquire) {
            LoadPhase::Loaded
        } else {
            LoadPhase::Pending
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.phase() == LoadPhase::Loaded
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The current cart.
    ///
    /// Reflects the latest mutation even if its write is still in flight.
    pub fn products(&self) -> Arc<Cart> {
        Arc::clone(&self.shared.snapshot.borrow())
    }

    /// Watch the cart. The receiver sees a new snapshot after every
    /// mutation and after a load that found a stored cart.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.shared.snapshot.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load
    // ─────────────────────────────────────────────────────────────────────────

    /// Seed the cart from storage.
    ///
    /// Runs once; later calls return immediately. A missing blob leaves the
    /// cart empty. If the cart was already mutated while pending, those
    /// writes replaced the stored blob, so the in-memory cart is kept and
    /// nothing is read.
    pub async fn load(&self) -> Result<()> {
        let mut writer = self.shared.writer.lock().await;

        if writer.phase == LoadPhase::Loaded {
            return Ok(());
        }

        let outcome = if writer.mutations > 0 {
            tracing::debug!(
                mutations = writer.mutations,
                "cart mutated before load, keeping in-memory state"
            );
            Ok(())
        } else {
            self.read_stored_cart().await
        };

        writer.phase = LoadPhase::Loaded;
        self.shared.loaded.store(true, Ordering::Release);
        outcome
    }

    async fn read_stored_cart(&self) -> Result<()> {
        let key = &self.config.storage_key;

        let cart = match self.store.load_cart(key).await {
            Ok(Some(cart)) => cart,
            Ok(None) => {
                tracing::debug!(key = %key, "no stored cart");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to load stored cart");
                return self.storage_failure(e.into());
            }
        };

        if self.config.validate_on_load {
            if let Err(e) = validate_cart(cart.items()) {
                tracing::warn!(key = %key, error = %e, "stored cart failed validation");
                return self.storage_failure(e.into());
            }
        }

        tracing::debug!(key = %key, lines = cart.len(), "loaded stored cart");
        self.shared.snapshot.send_replace(Arc::new(cart));
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add an item with quantity 1 at the front of the cart.
    ///
    /// Never merges: adding a product that already has a line creates a
    /// second line. Returns the new line. An item with a non-finite or
    /// negative price is rejected before anything changes.
    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem> {
        validate_new_item(&item)?;
        self.mutate("add_to_cart", move |cart| Ok(cart.add(item).clone()))
            .await
    }

    /// Increase the first line for `id` by one and move it to the front.
    /// Returns the updated line.
    pub async fn increment(&self, id: &str) -> Result<CartItem> {
        self.mutate("increment", |cart| cart.increment(id).cloned())
            .await
    }

    /// Decrease the first line for `id` by one, removing it at zero.
    pub async fn decrement(&self, id: &str) -> Result<Decrement> {
        self.mutate("decrement", |cart| cart.decrement(id)).await
    }

    /// Remove every line and delete the stored blob.
    pub async fn clear(&self) -> Result<()> {
        let mut writer = self.shared.writer.lock().await;

        writer.mutations += 1;
        self.shared.snapshot.send_replace(Arc::new(Cart::new()));
        tracing::trace!(op = "clear", "cart mutated");

        let key = &self.config.storage_key;
        if let Err(e) = self.store.remove(key).await {
            tracing::warn!(key = %key, error = %e, "failed to remove stored cart");
            return self.storage_failure(e.into());
        }
        Ok(())
    }

    /// Apply `f` to the latest cart under the writer lock, publish the
    /// result, then write it through.
    ///
    /// If `f` fails nothing is published or written.
    async fn mutate<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Cart) -> cart_core::Result<T> + Send,
        T: Send,
    {
        let mut writer = self.shared.writer.lock().await;

        let mut cart = Cart::clone(&self.shared.snapshot.borrow());
        let output = f(&mut cart)?;

        writer.mutations += 1;
        let cart = Arc::new(cart);
        self.shared.snapshot.send_replace(Arc::clone(&cart));
        tracing::trace!(op, lines = cart.len(), "cart mutated");

        self.persist(&cart).await?;
        Ok(output)
    }

    /// Write the whole cart under the configured key.
    async fn persist(&self, cart: &Cart) -> Result<()> {
        let key = &self.config.storage_key;
        if let Err(e) = self.store.save_cart(key, cart).await {
            tracing::warn!(key = %key, error = %e, "failed to persist cart");
            return self.storage_failure(e.into());
        }
        Ok(())
    }

    fn storage_failure(&self, err: CartError) -> Result<()> {
        match self.config.write_policy {
            WritePolicy::BestEffort => Ok(()),
            WritePolicy::Strict => Err(err),
        }
    }
}
