//! Strong type definitions for inventory records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of an [`Item`](crate::Item).
///
/// Backed by an `i64` so it maps directly onto a SQLite rowid. The value `0`
/// is reserved: an item carrying [`ItemId::UNASSIGNED`] asks the store to
/// assign the next id on insert.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    /// The "assign next" sentinel.
    pub const UNASSIGNED: Self = Self(0);

    /// Create an id from its raw value.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this is the sentinel the store replaces on insert.
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

// Form code and older callers hand ids around as 32-bit ints.
impl From<i32> for ItemId {
    fn from(raw: i32) -> Self {
        Self(i64::from(raw))
    }
}

impl From<ItemId> for i64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}
