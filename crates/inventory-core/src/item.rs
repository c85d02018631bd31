//! Item: the single persisted inventory record.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::types::ItemId;

/// A single row of the `items` table.
///
/// `name` is not checked for emptiness here; that belongs to the input
/// boundary ([`ItemDetails::is_valid`](crate::ItemDetails::is_valid)).
/// Negative prices and quantities are stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Primary key. [`ItemId::UNASSIGNED`] on insert means "assign next".
    pub id: ItemId,
    /// Display name; the list query orders by it.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub quantity: i32,
}

impl Item {
    /// Create an item that has not been stored yet.
    pub fn new(name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self {
            id: ItemId::UNASSIGNED,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Set an explicit id.
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether the price can be persisted (SQLite has no REAL encoding for NaN).
    pub fn has_storable_price(&self) -> bool {
        self.price.is_finite()
    }

    /// Order used by the list query: name ascending, then id.
    ///
    /// Names compare bytewise, which is what SQLite's BINARY collation does.
    pub fn list_order(a: &Item, b: &Item) -> Ordering {
        a.name
            .as_bytes()
            .cmp(b.name.as_bytes())
            .then(a.id.cmp(&b.id))
    }

    /// Price as a currency string, e.g. `$9.99` or `-$1.50`.
    pub fn formatted_price(&self) -> String {
        // Round to cents first so -0.0 and tiny negatives print as $0.00.
        let cents = (self.price * 100.0).round() / 100.0;
        if cents < 0.0 {
            format!("-${:.2}", -cents)
        } else {
            format!("${:.2}", cents + 0.0)
        }
    }
}
