//! In-memory implementation of the ItemStore trait.
//!
//! Primarily for testing and as the stand-in backend behind a repository.
//! It has the same semantics as SQLite (conflict-ignore inserts, never-reused
//! ids, name ordering) but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use inventory_core::{Item, ItemId};

use crate::error::{Result, StoreError};
use crate::traits::{check_storable, InsertResult, ItemStore, WriteResult};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via Mutex.
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Rows indexed by id.
    items: BTreeMap<ItemId, Item>,

    /// Largest id ever stored, deleted or not. Mirrors `sqlite_sequence`.
    high_water: i64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryStoreInner {
                items: BTreeMap::new(),
                high_water: 0,
            }),
        }
    }

    /// Create a store pre-populated with `items`, each inserted in order.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let store = Self::new();
        {
            let mut inner = store.lock()?;
            for item in items {
                inner.insert(&item)?;
            }
        }
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryStoreInner>> {
        self.inner
            .lock()
            .map_err(|e| StoreError::Task(format!("mutex poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStoreInner {
    fn insert(&mut self, item: &Item) -> Result<InsertResult> {
        check_storable(item)?;

        let id = if item.id.is_unassigned() {
            let next = self.high_water.checked_add(1).ok_or_else(|| {
                StoreError::InvalidData("item id space exhausted".to_string())
            })?;
            ItemId::new(next)
        } else if self.items.contains_key(&item.id) {
            return Ok(InsertResult::Ignored);
        } else {
            item.id
        };

        self.high_water = self.high_water.max(id.get());
        self.items.insert(
            id,
            Item {
                id,
                ..item.clone()
            },
        );

        Ok(InsertResult::Inserted(id))
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn insert(&self, item: &Item) -> Result<InsertResult> {
        self.lock()?.insert(item)
    }

    async fn update(&self, item: &Item) -> Result<WriteResult> {
        check_storable(item)?;
        let mut inner = self.lock()?;

        match inner.items.get_mut(&item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(WriteResult::Applied)
            }
            None => Ok(WriteResult::NotFound),
        }
    }

    async fn delete(&self, item: &Item) -> Result<WriteResult> {
        let mut inner = self.lock()?;

        match inner.items.remove(&item.id) {
            Some(_) => Ok(WriteResult::Applied),
            None => Ok(WriteResult::NotFound),
        }
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>> {
        let inner = self.lock()?;
        Ok(inner.items.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Item>> {
        let inner = self.lock()?;
        let mut items: Vec<Item> = inner.items.values().cloned().collect();
        items.sort_by(Item::list_order);
        Ok(items)
    }

    async fn count(&self) -> Result<usize> {
        let inner = self.lock()?;
        Ok(inner.items.len())
    }
}
