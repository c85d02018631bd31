//! Store trait: the abstract interface for item persistence.
//!
//! This trait keeps the rest of the crate storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use inventory_core::{Item, ItemId};

use crate::error::{Result, StoreError};

/// Result of inserting an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// A row was written under this id (assigned by the store if the item
    /// carried [`ItemId::UNASSIGNED`]).
    Inserted(ItemId),
    /// A row with the item's id already exists; nothing was written.
    Ignored,
}

impl InsertResult {
    /// The id the row was stored under, if anything was written.
    pub fn id(&self) -> Option<ItemId> {
        match self {
            InsertResult::Inserted(id) => Some(*id),
            InsertResult::Ignored => None,
        }
    }

    /// Whether the table changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, InsertResult::Inserted(_))
    }
}

/// Result of an update or delete addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// The row existed and was changed.
    Applied,
    /// No row has that id; nothing was written.
    NotFound,
}

impl WriteResult {
    /// Whether the table changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, WriteResult::Applied)
    }
}

/// The Store trait: async interface for item persistence.
///
/// All methods are async so SQLite can run on the blocking pool without
/// stalling the runtime. Each call is atomic with respect to the others;
/// callers never take locks themselves.
///
/// # Design Notes
///
/// - **Conflict-ignore inserts**: inserting an item whose id already exists
///   returns [`InsertResult::Ignored`] and leaves the row untouched.
/// - **Id assignment**: inserting [`ItemId::UNASSIGNED`] assigns an id greater
///   than any id ever stored, including deleted ones.
/// - **Soft misses**: update/delete of a missing id return
///   [`WriteResult::NotFound`], never an error.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// Insert a new row.
    async fn insert(&self, item: &Item) -> Result<InsertResult>;

    /// Replace every field of the row with `item.id`.
    async fn update(&self, item: &Item) -> Result<WriteResult>;

    /// Remove the row with `item.id`. Only the id is consulted.
    async fn delete(&self, item: &Item) -> Result<WriteResult>;

    /// Get the row with `id`.
    async fn get(&self, id: ItemId) -> Result<Option<Item>>;

    /// Get every row, ordered by name ascending (ties by id).
    async fn all(&self) -> Result<Vec<Item>>;

    /// Number of rows.
    async fn count(&self) -> Result<usize>;
}

/// Reject values the SQLite REAL column cannot hold.
///
/// Both backends call this so they fail the same way.
pub(crate) fn check_storable(item: &Item) -> Result<()> {
    if item.has_storable_price() {
        Ok(())
    } else {
        Err(StoreError::InvalidData(format!(
            "price of item {} is not a finite number",
            item.id
        )))
    }
}

/// Forwarding impl so a backend chosen at runtime can sit behind a box.
#[async_trait]
impl<S: ItemStore + ?Sized> ItemStore for Box<S> {
    async fn insert(&self, item: &Item) -> Result<InsertResult> {
        (**self).insert(item).await
    }

    async fn update(&self, item: &Item) -> Result<WriteResult> {
        (**self).update(item).await
    }

    async fn delete(&self, item: &Item) -> Result<WriteResult> {
        (**self).delete(item).await
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>> {
        (**self).get(id).await
    }

    async fn all(&self) -> Result<Vec<Item>> {
        (**self).all().await
    }

    async fn count(&self) -> Result<usize> {
        (**self).count().await
    }
}
