//! Configuration for opening an inventory database.

use std::path::PathBuf;

use inventory_store::{NotifyPolicy, DEFAULT_CHANNEL_CAPACITY};

/// Default database file name.
pub const DEFAULT_DATABASE_NAME: &str = "item_database";

/// Where items are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// Volatile, process-local storage backed by [`MemoryStore`](inventory_store::MemoryStore).
    Memory,
    /// A SQLite database file.
    File(PathBuf),
}

/// Configuration for an [`InventoryDatabase`](crate::InventoryDatabase).
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Storage backend and location.
    pub storage: StorageLocation,
    /// When live queries re-deliver results.
    pub notify: NotifyPolicy,
    /// Buffered results per live query before its producer waits.
    pub channel_capacity: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            storage: StorageLocation::File(PathBuf::from(DEFAULT_DATABASE_NAME)),
            notify: NotifyPolicy::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl InventoryConfig {
    /// Configuration for a throwaway in-memory database.
    pub fn in_memory() -> Self {
        Self {
            storage: StorageLocation::Memory,
            ..Self::default()
        }
    }

    /// Configuration for a SQLite file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// Set the notify policy.
    pub fn with_notify(mut self, notify: NotifyPolicy) -> Self {
        self.notify = notify;
        self
    }
}
