//! # Inventory Core
//!
//! Pure data types for the inventory store: the [`Item`] record, its
//! [`ItemId`], and the text-input boundary that turns raw form fields into
//! items and back.
//!
//! This crate contains no I/O and no storage. Persistence lives in
//! `inventory-store`; the application-facing API lives in `inventory`.
//!
//! ## Key Types
//!
//! - [`Item`] - A single inventory record (id, name, price, quantity)
//! - [`ItemId`] - Primary key, with [`ItemId::UNASSIGNED`] as the "assign next" sentinel
//! - [`ItemDetails`] - Unvalidated text form of an item
//! - [`ItemUiState`] - Entry form state: details plus validity

pub mod details;
pub mod item;
pub mod types;

pub use details::{ItemDetails, ItemUiState};
pub use item::Item;
pub use types::ItemId;
