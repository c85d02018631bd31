//! The repository: the only surface the application talks to.
//!
//! [`ItemsRepository`] names the five operations an item screen needs.
//! [`OfflineItemsRepository`] implements them by forwarding to a
//! [`LiveStore`] with no extra logic, so the storage engine can change
//! without touching callers.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};

use inventory_core::{Item, ItemId};
use inventory_store::{InsertResult, ItemStore, LiveStore, WriteResult};

use crate::error::{InventoryError, Result};

/// A live sequence of query results.
///
/// Emits the current result on subscription and a fresh one after each write
/// that affects it. A storage failure arrives as one `Err` and ends the stream.
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Insert, update, delete, and observe [`Item`]s.
#[async_trait]
pub trait ItemsRepository: Send + Sync {
    /// Every item, ordered by name, kept up to date.
    fn get_all_items_stream(&self) -> ItemStream<Vec<Item>>;

    /// The item with `id`, or `None` while it does not exist, kept up to date.
    fn get_item_stream(&self, id: ItemId) -> ItemStream<Option<Item>>;

    /// Insert an item. An existing id is left untouched and reported as
    /// [`InsertResult::Ignored`].
    async fn insert_item(&self, item: &Item) -> Result<InsertResult>;

    /// Replace the item with `item.id`; [`WriteResult::NotFound`] if absent.
    async fn update_item(&self, item: &Item) -> Result<WriteResult>;

    /// Delete the item with `item.id`; [`WriteResult::NotFound`] if absent.
    async fn delete_item(&self, item: &Item) -> Result<WriteResult>;
}

/// Repository backed by a local store.
pub struct OfflineItemsRepository<S: ItemStore> {
    live: LiveStore<S>,
}

impl<S: ItemStore> Clone for OfflineItemsRepository<S> {
    fn clone(&self) -> Self {
        Self {
            live: self.live.clone(),
        }
    }
}

impl<S: ItemStore> OfflineItemsRepository<S> {
    /// Repository over an existing live store handle.
    pub fn new(live: LiveStore<S>) -> Self {
        Self { live }
    }

    /// Repository over `store` with default live-query settings.
    pub fn from_store(store: S) -> Self {
        Self::new(LiveStore::new(store))
    }

    /// The underlying live store.
    #[cfg(test)]
    pub(crate) fn live_store(&self) -> &LiveStore<S> {
        &self.live
    }
}

#[async_trait]
impl<S: ItemStore> ItemsRepository for OfflineItemsRepository<S> {
    fn get_all_items_stream(&self) -> ItemStream<Vec<Item>> {
        Box::pin(self.live.stream_all().map(|r| r.map_err(InventoryError::from)))
    }

    fn get_item_stream(&self, id: ItemId) -> ItemStream<Option<Item>> {
        Box::pin(self.live.stream_by_id(id).map(|r| r.map_err(InventoryError::from)))
    }

    async fn insert_item(&self, item: &Item) -> Result<InsertResult> {
        Ok(self.live.insert(item).await?)
    }

    async fn update_item(&self, item: &Item) -> Result<WriteResult> {
        Ok(self.live.update(item).await?)
    }

    async fn delete_item(&self, item: &Item) -> Result<WriteResult> {
        Ok(self.live.delete(item).await?)
    }
}
