//! # Inventory Store
//!
//! Storage abstraction for inventory items. Provides a trait-based interface
//! for item persistence with SQLite and in-memory implementations, plus the
//! live-query layer that turns reads into continuously updating streams.
//!
//! ## Overview
//!
//! The store module abstracts item storage behind the [`ItemStore`] trait,
//! so callers are storage-agnostic. The primary implementation is
//! [`SqliteStore`], with [`MemoryStore`] for tests. [`LiveStore`] wraps
//! either one and re-delivers query results whenever a write changes the
//! table.
//!
//! ## Key Types
//!
//! - [`ItemStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`LiveStore`] - Change notification over any store
//! - [`LiveQuery`] - A subscription; implements `futures::Stream`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use inventory_core::Item;
//! use inventory_store::{LiveStore, SqliteStore};
//!
//! async fn example() {
//!     let live = LiveStore::new(SqliteStore::open("item_database").unwrap());
//!
//!     let mut items = live.stream_all();
//!     let current = items.next().await;
//!
//!     live.insert(&Item::new("Widget", 9.99, 5)).await.unwrap();
//!     let updated = items.next().await;
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Conflict-ignore inserts**: inserting an existing id returns `Ignored`
//! - **Never-reused ids**: assigned ids grow past every id ever stored
//! - **Soft misses**: update/delete of a missing id return `NotFound`
//! - **Latest-state delivery**: bursts of writes may coalesce into one emission

pub mod error;
pub mod live;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use live::{LiveQuery, LiveStore, NotifyPolicy, DEFAULT_CHANNEL_CAPACITY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{InsertResult, ItemStore, WriteResult};
