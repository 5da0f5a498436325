//! Storage test doubles.
//!
//! Each double wraps a [`MemoryStore`] and changes one thing about it:
//! [`FailingStore`] refuses operations, [`GatedStore`] holds writes until the
//! test releases them, [`RecordingStore`] keeps every write it saw.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use cart_store::{KvStore, MemoryStore, Result, StoreError};
use tokio::sync::{watch, Semaphore};

// ─────────────────────────────────────────────────────────────────────────────
// FailingStore
// ─────────────────────────────────────────────────────────────────────────────

/// A store whose reads and/or writes always fail.
#[derive(Debug)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: bool,
    attempts: AtomicUsize,
}

impl FailingStore {
    /// Every operation fails.
    pub fn new() -> Self {
        Self::build(MemoryStore::new(), true, true)
    }

    /// Reads succeed against `inner`; writes fail.
    pub fn writes_only(inner: MemoryStore) -> Self {
        Self::build(inner, false, true)
    }

    /// Reads fail; writes succeed.
    pub fn reads_only() -> Self {
        Self::build(MemoryStore::new(), true, false)
    }

    fn build(inner: MemoryStore, fail_reads: bool, fail_writes: bool) -> Self {
        Self {
            inner,
            fail_reads,
            fail_writes,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of operations attempted, failed or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// The wrapped store, for inspecting what did get written.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self, fails: bool, op: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if fails {
            Err(StoreError::Unavailable(format!("{} refused by FailingStore", op)))
        } else {
            Ok(())
        }
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check(self.fail_reads, "get")?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check(self.fail_writes, "set")?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.check(self.fail_writes, "remove")?;
        self.inner.remove(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.check(self.fail_reads, "keys")?;
        self.inner.keys().await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GatedStore
// ─────────────────────────────────────────────────────────────────────────────

/// A store whose writes block until the test lets them through.
///
/// Reads are never gated. Each [`release`](GatedStore::release) lets one more
/// pending or future write complete.
#[derive(Debug)]
pub struct GatedStore {
    inner: MemoryStore,
    gate: Semaphore,
    waiting: watch::Sender<usize>,
}

impl GatedStore {
    pub fn new() -> Self {
        Self::wrap(MemoryStore::new())
    }

    pub fn wrap(inner: MemoryStore) -> Self {
        let (waiting, _) = watch::channel(0);
        Self {
            inner,
            gate: Semaphore::new(0),
            waiting,
        }
    }

    /// Let `n` more writes through.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    /// Number of writes currently blocked at the gate.
    pub fn waiting(&self) -> usize {
        *self.waiting.borrow()
    }

    /// Resolve once at least `n` writes are blocked at the gate.
    pub async fn wait_for_waiting(&self, n: usize) {
        let mut rx = self.waiting.subscribe();
        // The sender lives in self, so the channel can't close here.
        let _ = rx.wait_for(|waiting| *waiting >= n).await;
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    async fn pass(&self) -> Result<()> {
        let permit = {
            let _waiting = WaitingGuard::enter(&self.waiting);
            self.gate.acquire().await
        };

        let permit = permit.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        permit.forget();
        Ok(())
    }
}

/// Counts one write as blocked at the gate until dropped, including when the
/// write is cancelled mid-wait.
struct WaitingGuard<'a>(&'a watch::Sender<usize>);

impl<'a> WaitingGuard<'a> {
    fn enter(waiting: &'a watch::Sender<usize>) -> Self {
        waiting.send_modify(|w| *w += 1);
        Self(waiting)
    }
}

impl Drop for WaitingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|w| *w -= 1);
    }
}

impl Default for GatedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.pass().await?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.pass().await?;
        self.inner.remove(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys().await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RecordingStore
// ─────────────────────────────────────────────────────────────────────────────

/// A store that remembers every `set`, in order.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<(String, String)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(key, value)` written so far.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Values written under `key`, oldest first.
    pub fn values_for(&self, key: &str) -> Vec<String> {
        self.writes()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or(0)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl KvStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes
            .lock()?
            .push((key.to_owned(), value.to_owned()));
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_failing_store_refuses() {
        let store = FailingStore::new();
        assert!(store.get("k").await.is_err());
        assert!(store.set("k", "v").await.is_err());
        assert_eq!(store.attempts(), 2);
    }

    #[tokio::test]
    async fn test_failing_store_writes_only() {
        let store = FailingStore::writes_only(MemoryStore::with_entries([("k", "v")]));
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        assert!(store.set("k", "w").await.is_err());
        assert_eq!(store.inner().get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_gated_store_holds_writes() {
        let store = Arc::new(GatedStore::new());

        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.set("k", "v").await })
        };

        store.wait_for_waiting(1).await;
        assert_eq!(store.get("k").await.unwrap(), None);

        store.release(1);
        writer.await.unwrap().unwrap();
        assert_eq!(store.waiting(), 0);
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_gated_store_forgets_cancelled_writes() {
        let store = GatedStore::new();

        let write = tokio::time::timeout(Duration::from_millis(10), store.set("k", "v")).await;
        assert!(write.is_err());
        assert_eq!(store.waiting(), 0);

        // The permit goes to the next write, not the cancelled one.
        store.release(1);
        store.set("k", "w").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("w"));
    }

    #[tokio::test]
    async fn test_failing_store_reads_only() {
        let store = FailingStore::reads_only();
        assert!(store.get("k").await.is_err());
        store.set("k", "v").await.unwrap();
        assert_eq!(store.inner().get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(store.attempts(), 2);
    }

    #[tokio::test]
    async fn test_recording_store_keeps_order() {
        let store = RecordingStore::new();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store.set("a", "3").await.unwrap();

        assert_eq!(store.write_count(), 3);
        assert_eq!(store.values_for("a"), vec!["1", "3"]);
    }
}
