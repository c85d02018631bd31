//! Error types for the inventory API.

use inventory_store::StoreError;
use thiserror::Error;

/// Errors that can occur during inventory operations.
///
/// Duplicate inserts and writes to missing rows are not errors; see
/// [`InsertResult`](crate::InsertResult) and [`WriteResult`](crate::WriteResult).
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
