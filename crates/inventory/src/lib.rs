//! # Inventory
//!
//! The application-facing API for a single-user inventory: store named items
//! with a price and quantity, and observe them through live queries that
//! re-emit whenever the data changes.
//!
//! ## Overview
//!
//! - **Items**: rows keyed by an auto-assigned, never-reused id
//! - **Repository**: the only interface the rest of an application uses
//! - **Live queries**: streams that yield the current result, then a fresh
//!   one after every write that affects it
//! - **Entry forms**: text input converted to items before it is saved
//!
//! ## Usage
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use inventory::{InventoryConfig, InventoryDatabase, Item, ItemsRepository};
//!
//! async fn example() {
//!     // Open the one database handle for this process
//!     let db = InventoryDatabase::open(InventoryConfig::default()).unwrap();
//!     let repo = db.items_repository();
//!
//!     // Watch the item list
//!     let mut items = repo.get_all_items_stream();
//!     let current = items.next().await;
//!
//!     // Add an item; the list stream re-emits
//!     repo.insert_item(&Item::new("Widget", 9.99, 5)).await.unwrap();
//!     let updated = items.next().await;
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `inventory::core` - Item types and text conversion
//! - `inventory::store` - Storage backends and live queries

pub mod config;
pub mod database;
pub mod entry;
pub mod error;
pub mod repository;

// Re-export component crates
pub use inventory_core as core;
pub use inventory_store as store;

// Re-export main types for convenience
pub use config::{InventoryConfig, StorageLocation, DEFAULT_DATABASE_NAME};
pub use database::{DynItemStore, InventoryDatabase};
pub use entry::ItemEntry;
pub use error::{InventoryError, Result};
pub use repository::{ItemStream, ItemsRepository, OfflineItemsRepository};

// Re-export commonly used types
pub use inventory_core::{Item, ItemDetails, ItemId, ItemUiState};
pub use inventory_store::{InsertResult, NotifyPolicy, WriteResult};
