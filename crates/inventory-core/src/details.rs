//! Conversion between raw text input and [`Item`] values.
//!
//! Entry forms hold every field as text. Before anything reaches the store
//! the text is checked ([`ItemDetails::is_valid`]) and converted
//! ([`ItemDetails::to_item`]). Conversion never fails: unparsable numbers
//! fall back to zero.

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::types::ItemId;

/// Text form of an item as typed into an entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ItemDetails {
    /// True when no field is blank.
    ///
    /// Only presence is checked; `"abc"` is a valid price field and converts
    /// to `0.0`.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.price.trim().is_empty()
            && !self.quantity.trim().is_empty()
    }

    /// Convert to an [`Item`].
    ///
    /// A price that does not parse as a finite `f64` becomes `0.0`; a
    /// quantity that does not parse as an `i32` becomes `0`.
    pub fn to_item(&self) -> Item {
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .unwrap_or(0.0);
        let quantity = self.quantity.trim().parse::<i32>().unwrap_or(0);

        Item {
            id: self.id,
            name: self.name.clone(),
            price,
            quantity,
        }
    }
}

impl Item {
    /// Text form of this item, for pre-filling an edit form.
    pub fn to_details(&self) -> ItemDetails {
        ItemDetails {
            id: self.id,
            name: self.name.clone(),
            price: self.price.to_string(),
            quantity: self.quantity.to_string(),
        }
    }

    /// Form state for this item.
    pub fn to_ui_state(&self, is_entry_valid: bool) -> ItemUiState {
        ItemUiState {
            details: self.to_details(),
            is_entry_valid,
        }
    }
}

/// Entry form state: the current text plus whether it may be saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUiState {
    pub details: ItemDetails,
    pub is_entry_valid: bool,
}

impl ItemUiState {
    /// State for `details`, with validity computed from it.
    pub fn from_details(details: ItemDetails) -> Self {
        let is_entry_valid = details.is_valid();
        Self {
            details,
            is_entry_valid,
        }
    }
}
