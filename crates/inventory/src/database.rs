//! The owned database handle.
//!
//! Open one [`InventoryDatabase`] at startup and pass it (or repositories
//! made from it) to whoever needs item access. There is no global instance.

use inventory_store::{ItemStore, LiveStore, MemoryStore, SqliteStore};

use crate::config::{InventoryConfig, StorageLocation};
use crate::error::{InventoryError, Result};
use crate::repository::OfflineItemsRepository;

/// Storage backend chosen at open time.
pub type DynItemStore = Box<dyn ItemStore>;

/// A single opened item database.
///
/// Every repository handed out shares this handle's store and change feed, so
/// a write through one repository wakes live queries on all of them.
pub struct InventoryDatabase {
    live: LiveStore<DynItemStore>,
    config: InventoryConfig,
}

impl InventoryDatabase {
    /// Open the database described by `config`.
    ///
    /// For file storage this creates the file and applies the schema if needed.
    pub fn open(config: InventoryConfig) -> Result<Self> {
        if config.channel_capacity == 0 {
            return Err(InventoryError::Config(
                "channel_capacity must be at least 1".to_string(),
            ));
        }

        let store: DynItemStore = match &config.storage {
            StorageLocation::Memory => Box::new(MemoryStore::new()),
            StorageLocation::File(path) if path.as_os_str().is_empty() => {
                return Err(InventoryError::Config(
                    "database path is empty".to_string(),
                ));
            }
            StorageLocation::File(path) => Box::new(SqliteStore::open(path)?),
        };

        tracing::info!(storage = ?config.storage, notify = ?config.notify, "inventory database opened");

        let live = LiveStore::new(store)
            .with_policy(config.notify)
            .with_capacity(config.channel_capacity);

        Ok(Self { live, config })
    }

    /// A repository over this database.
    pub fn items_repository(&self) -> OfflineItemsRepository<DynItemStore> {
        OfflineItemsRepository::new(self.live.clone())
    }

    /// The configuration this database was opened with.
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Number of live queries currently open across every repository.
    pub fn subscriber_count(&self) -> usize {
        self.live.subscriber_count()
    }

    /// The live store shared by all repositories from this database.
    #[cfg(test)]
    pub(crate) fn live_store(&self) -> &LiveStore<DynItemStore> {
        &self.live
    }
}
