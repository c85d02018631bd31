//! Live queries: query results that re-emit when the table changes.
//!
//! [`LiveStore`] wraps any [`ItemStore`]. Writes go through it so it can bump
//! a table version after every write that changed a row. Each subscription
//! runs a background producer that re-runs its query on every bump and
//! forwards the result to a [`LiveQuery`] stream.
//!
//! Bumps that arrive while a producer is busy coalesce into one re-run. The
//! query always reads the latest durable state, so a delivered result never
//! reflects a write without also reflecting every write applied before it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::ReceiverStream;

use inventory_core::{Item, ItemId};

use crate::error::{Result, StoreError};
use crate::traits::{InsertResult, ItemStore, WriteResult};

/// Default per-subscription buffer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// When a live query re-delivers its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyPolicy {
    /// Only when the re-run result differs from the last one delivered.
    #[default]
    OnChange,
    /// After every write that changed a row, even if this query's result did
    /// not change.
    EveryWrite,
}

/// A store whose reads can be observed as live queries.
///
/// Cloning is cheap; clones share the store and the change feed. Once every
/// clone is dropped, open [`LiveQuery`] streams finish.
pub struct LiveStore<S: ItemStore> {
    store: Arc<S>,
    version: Arc<watch::Sender<u64>>,
    policy: NotifyPolicy,
    capacity: usize,
}

impl<S: ItemStore> Clone for LiveStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            version: self.version.clone(),
            policy: self.policy,
            capacity: self.capacity,
        }
    }
}

impl<S: ItemStore> LiveStore<S> {
    /// Wrap `store` with the default policy and buffer size.
    pub fn new(store: S) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            store: Arc::new(store),
            version: Arc::new(version),
            policy: NotifyPolicy::default(),
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Set the re-delivery policy for subscriptions created after this call.
    pub fn with_policy(mut self, policy: NotifyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the per-subscription buffer (at least 1).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// The wrapped store.
    ///
    /// Writes made directly on it bypass change notification.
    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// The re-delivery policy.
    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    /// Number of writes that have changed the table through this handle.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Number of live query producers currently running.
    pub fn subscriber_count(&self) -> usize {
        self.version.receiver_count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert an item; wakes live queries if a row was written.
    pub async fn insert(&self, item: &Item) -> Result<InsertResult> {
        let item = item.clone();
        self.commit(move |store| async move {
            let result = store.insert(&item).await?;
            if let InsertResult::Inserted(id) = result {
                tracing::debug!(%id, "item inserted");
            }
            Ok((result, result.is_applied()))
        })
        .await
    }

    /// Replace an item; wakes live queries if the row existed.
    pub async fn update(&self, item: &Item) -> Result<WriteResult> {
        let item = item.clone();
        self.commit(move |store| async move {
            let result = store.update(&item).await?;
            if result.is_applied() {
                tracing::debug!(id = %item.id, "item updated");
            }
            Ok((result, result.is_applied()))
        })
        .await
    }

    /// Delete an item; wakes live queries if the row existed.
    pub async fn delete(&self, item: &Item) -> Result<WriteResult> {
        let item = item.clone();
        self.commit(move |store| async move {
            let result = store.delete(&item).await?;
            if result.is_applied() {
                tracing::debug!(id = %item.id, "item deleted");
            }
            Ok((result, result.is_applied()))
        })
        .await
    }

    /// Run a write and its notification on a task of their own.
    ///
    /// The write always runs to completion and live queries always hear
    /// about it, even if the caller stops polling the returned future.
    async fn commit<T, W, Fut>(&self, write: W) -> Result<T>
    where
        T: Send + 'static,
        W: FnOnce(Arc<S>) -> Fut,
        Fut: Future<Output = Result<(T, bool)>> + Send + 'static,
    {
        let version = self.version.clone();
        let write = write(self.store.clone());

        tokio::spawn(async move {
            let (result, applied) = write.await?;
            if applied {
                // send_modify updates even with no receivers, unlike send.
                version.send_modify(|v| *v += 1);
            }
            Ok::<_, StoreError>(result)
        })
        .await?
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// One-shot read of a single item.
    pub async fn get(&self, id: ItemId) -> Result<Option<Item>> {
        self.store.get(id).await
    }

    /// One-shot read of every item, ordered by name.
    pub async fn all(&self) -> Result<Vec<Item>> {
        self.store.all().await
    }

    /// Live view of every item, ordered by name.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn stream_all(&self) -> LiveQuery<Vec<Item>> {
        self.subscribe("all", |store: Arc<S>| async move { store.all().await })
    }

    /// Live view of one item; `None` while no row has `id`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn stream_by_id(&self, id: ItemId) -> LiveQuery<Option<Item>> {
        self.subscribe("by_id", move |store: Arc<S>| async move { store.get(id).await })
    }

    fn subscribe<T, Q, Fut>(&self, query_name: &'static str, query: Q) -> LiveQuery<T>
    where
        T: Clone + PartialEq + Send + 'static,
        Q: Fn(Arc<S>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.capacity);
        let store = self.store.clone();
        let mut changes = self.version.subscribe();
        let policy = self.policy;

        tokio::spawn(async move {
            tracing::debug!(query = query_name, "live query started");
            let mut last: Option<T> = None;

            loop {
                // Mark the version seen before reading so a write that lands
                // during the read triggers another pass.
                let seen = *changes.borrow_and_update();

                match query(store.clone()).await {
                    Ok(value) => {
                        let unchanged =
                            policy == NotifyPolicy::OnChange && last.as_ref() == Some(&value);
                        if !unchanged {
                            if tx.send(Ok(value.clone())).await.is_err() {
                                break;
                            }
                            last = Some(value);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(query = query_name, version = seen, error = %e, "live query failed");
                        let _ = tx.send(Err(e)).await;
                        break;
                    }
                }

                tokio::select! {
                    _ = tx.closed() => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }

            tracing::debug!(query = query_name, "live query stopped");
        });

        LiveQuery {
            inner: ReceiverStream::new(rx),
        }
    }
}

/// A live query subscription.
///
/// Yields the current result first, then a fresh result after writes that
/// affect it. Ends only when the store is torn down or after delivering a
/// storage error. Dropping it stops the background producer.
pub struct LiveQuery<T> {
    inner: ReceiverStream<Result<T>>,
}

impl<T> Stream for LiveQuery<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl<T> std::fmt::Debug for LiveQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveQuery").finish_non_exhaustive()
    }
}
