//! Entry form state holder.
//!
//! Keeps the text an entry screen is editing, revalidates it on every
//! change, and saves it through a repository only when it is valid.

use inventory_core::{ItemDetails, ItemUiState};
use inventory_store::InsertResult;

use crate::error::Result;
use crate::repository::ItemsRepository;

/// State behind an "add item" screen.
#[derive(Debug, Clone, Default)]
pub struct ItemEntry {
    ui_state: ItemUiState,
}

impl ItemEntry {
    /// An empty, invalid form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form state.
    pub fn ui_state(&self) -> &ItemUiState {
        &self.ui_state
    }

    /// Replace the form text and recompute validity.
    pub fn update_ui_state(&mut self, details: ItemDetails) {
        self.ui_state = ItemUiState::from_details(details);
    }

    /// Insert the item if the form is valid.
    ///
    /// Returns `None` without touching the repository when it is not.
    pub async fn save(&self, repository: &dyn ItemsRepository) -> Result<Option<InsertResult>> {
        if !self.ui_state.details.is_valid() {
            tracing::debug!("entry not saved: form incomplete");
            return Ok(None);
        }

        let item = self.ui_state.details.to_item();
        repository.insert_item(&item).await.map(Some)
    }
}
