//! # Inventory Testkit
//!
//! Testing utilities for the inventory crates.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a repository wired to either backend, plus helpers for
//!   awaiting live-query emissions with a timeout
//! - **Generators**: Proptest strategies for items and raw form input
//! - **Fake repository**: an independent [`ItemsRepository`] implementation
//!   for exercising code that only depends on the trait
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use inventory_testkit::generators::ItemParams;
//!
//! proptest! {
//!     #[test]
//!     fn details_round_trip(params: ItemParams) {
//!         let item = params.to_item();
//!         prop_assert_eq!(item.to_details().to_item(), item);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use inventory_testkit::fixtures::{next_emission, Backend, TestFixture};
//! use inventory::{Item, ItemsRepository};
//!
//! async fn example() {
//!     let fixture = TestFixture::new(Backend::Sqlite);
//!     let mut items = fixture.repo.get_all_items_stream();
//!     let empty = next_emission(&mut items).await;
//!     fixture.repo.insert_item(&Item::new("Widget", 9.99, 5)).await.unwrap();
//! }
//! ```
//!
//! [`ItemsRepository`]: inventory::ItemsRepository

pub mod fake;
pub mod fixtures;
pub mod generators;

pub use fake::{FakeItemsRepository, RepoCall};
pub use fixtures::{expect_quiet, init_tracing, next_emission, Backend, TestFixture};
pub use generators::{item_from_params, ItemParams};
