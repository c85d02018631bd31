//! A fake repository that does not use any store from `inventory-store`.
//!
//! Holds rows in a `tokio::sync::watch` channel and serves live queries as
//! `WatchStream`s. It honours the repository contract (conflict-ignore,
//! never-reused ids, name ordering) and records every call, so code written
//! against [`ItemsRepository`] can be tested without a database.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use inventory::store::StoreError;
use inventory::{
    InsertResult, InventoryError, Item, ItemId, ItemStream, ItemsRepository, Result, WriteResult,
};

/// A recorded repository call.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoCall {
    StreamAll,
    StreamById(ItemId),
    Insert(Item),
    Update(Item),
    Delete(Item),
}

#[derive(Debug, Clone, Default)]
struct Table {
    rows: BTreeMap<ItemId, Item>,
    high_water: i64,
}

/// In-process [`ItemsRepository`] with call recording.
///
/// Every applied write re-emits on every open stream, even if that stream's
/// result did not change.
pub struct FakeItemsRepository {
    table: watch::Sender<Table>,
    calls: Mutex<Vec<RepoCall>>,
}

impl FakeItemsRepository {
    /// An empty repository.
    pub fn new() -> Self {
        let (table, _) = watch::channel(Table::default());
        Self {
            table,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<RepoCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Current rows ordered by name.
    pub fn items(&self) -> Vec<Item> {
        sorted(&self.table.borrow())
    }

    fn record(&self, call: RepoCall) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl Default for FakeItemsRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted(table: &Table) -> Vec<Item> {
    let mut items: Vec<Item> = table.rows.values().cloned().collect();
    items.sort_by(Item::list_order);
    items
}

#[async_trait]
impl ItemsRepository for FakeItemsRepository {
    fn get_all_items_stream(&self) -> ItemStream<Vec<Item>> {
        self.record(RepoCall::StreamAll);
        let stream = WatchStream::new(self.table.subscribe())
            .map(|table| Ok::<_, InventoryError>(sorted(&table)));
        Box::pin(stream)
    }

    fn get_item_stream(&self, id: ItemId) -> ItemStream<Option<Item>> {
        self.record(RepoCall::StreamById(id));
        let stream = WatchStream::new(self.table.subscribe())
            .map(move |table| Ok::<_, InventoryError>(table.rows.get(&id).cloned()));
        Box::pin(stream)
    }

    async fn insert_item(&self, item: &Item) -> Result<InsertResult> {
        self.record(RepoCall::Insert(item.clone()));

        let mut result = Ok(InsertResult::Ignored);
        self.table.send_if_modified(|table| {
            let id = if item.id.is_unassigned() {
                match table.high_water.checked_add(1) {
                    Some(next) => ItemId::new(next),
                    None => {
                        result = Err(StoreError::InvalidData(
                            "item id space exhausted".to_string(),
                        ));
                        return false;
                    }
                }
            } else if table.rows.contains_key(&item.id) {
                return false;
            } else {
                item.id
            };

            table.high_water = table.high_water.max(id.get());
            table.rows.insert(id, item.clone().with_id(id));
            result = Ok(InsertResult::Inserted(id));
            true
        });

        Ok(result?)
    }

    async fn update_item(&self, item: &Item) -> Result<WriteResult> {
        self.record(RepoCall::Update(item.clone()));

        let applied = self.table.send_if_modified(|table| match table.rows.get_mut(&item.id) {
            Some(row) => {
                *row = item.clone();
                true
            }
            None => false,
        });

        Ok(if applied {
            WriteResult::Applied
        } else {
            WriteResult::NotFound
        })
    }

    async fn delete_item(&self, item: &Item) -> Result<WriteResult> {
        self.record(RepoCall::Delete(item.clone()));

        let applied = self
            .table
            .send_if_modified(|table| table.rows.remove(&item.id).is_some());

        Ok(if applied {
            WriteResult::Applied
        } else {
            WriteResult::NotFound
        })
    }
}
