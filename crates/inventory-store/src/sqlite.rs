//! SQLite implementation of the ItemStore trait.
//!
//! This is the primary storage backend. It uses rusqlite with bundled
//! SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use inventory_core::{Item, ItemId};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{check_storable, InsertResult, ItemStore, WriteResult};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex, which also serializes writers. All
/// operations use spawn_blocking to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        tracing::debug!(path = %path.display(), "opened item database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation on the connection from the blocking pool.
    async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|e| {
                StoreError::Database(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                    Some(format!("mutex poisoned: {}", e)),
                ))
            })?;
            f(&mut *conn)
        })
        .await?
    }
}

const SELECT_ITEM: &str = "SELECT id, name, price, quantity FROM items";

// Helper to convert a row to Item
fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: ItemId::new(row.get("id")?),
        name: row.get("name")?,
        price: row.get("price")?,
        quantity: row.get("quantity")?,
    })
}

#[async_trait]
impl ItemStore for SqliteStore {
    async fn insert(&self, item: &Item) -> Result<InsertResult> {
        check_storable(item)?;
        let item = item.clone();

        self.run(move |conn| {
            // nullif turns the 0 sentinel into NULL so SQLite assigns the rowid.
            let changed = conn.execute(
                "INSERT OR IGNORE INTO items (id, name, price, quantity)
                 VALUES (nullif(?1, 0), ?2, ?3, ?4)",
                params![item.id.get(), item.name, item.price, item.quantity],
            )?;

            if changed == 0 {
                return Ok(InsertResult::Ignored);
            }

            Ok(InsertResult::Inserted(ItemId::new(conn.last_insert_rowid())))
        })
        .await
    }

    async fn update(&self, item: &Item) -> Result<WriteResult> {
        check_storable(item)?;
        let item = item.clone();

        self.run(move |conn| {
            let changed = conn.execute(
                "UPDATE items SET name = ?2, price = ?3, quantity = ?4 WHERE id = ?1",
                params![item.id.get(), item.name, item.price, item.quantity],
            )?;

            Ok(if changed == 0 {
                WriteResult::NotFound
            } else {
                WriteResult::Applied
            })
        })
        .await
    }

    async fn delete(&self, item: &Item) -> Result<WriteResult> {
        let id = item.id;

        self.run(move |conn| {
            let changed = conn.execute("DELETE FROM items WHERE id = ?1", params![id.get()])?;

            Ok(if changed == 0 {
                WriteResult::NotFound
            } else {
                WriteResult::Applied
            })
        })
        .await
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>> {
        self.run(move |conn| {
            let item = conn
                .query_row(
                    &format!("{} WHERE id = ?1", SELECT_ITEM),
                    params![id.get()],
                    row_to_item,
                )
                .optional()?;
            Ok(item)
        })
        .await
    }

    async fn all(&self) -> Result<Vec<Item>> {
        self.run(|conn| {
            let mut stmt = conn.prepare(&format!("{} ORDER BY name ASC, id ASC", SELECT_ITEM))?;

            let items = stmt
                .query_map([], row_to_item)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(items)
        })
        .await
    }

    async fn count(&self) -> Result<usize> {
        self.run(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }
}
