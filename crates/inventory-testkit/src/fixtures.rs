//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Once;
use std::time::Duration;

use futures::{Stream, StreamExt};
use tempfile::TempDir;

use inventory::{
    DynItemStore, InventoryConfig, InventoryDatabase, Item, ItemsRepository, NotifyPolicy,
    OfflineItemsRepository,
};

/// How long helpers wait for an emission before failing the test.
pub const EMISSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Storage backend for a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    /// SQLite file in a temporary directory.
    Sqlite,
}

impl Backend {
    /// Every backend, for tests that run against each.
    pub const ALL: [Backend; 2] = [Backend::Memory, Backend::Sqlite];
}

/// A test fixture: an opened database and a repository over it.
pub struct TestFixture {
    pub backend: Backend,
    pub db: InventoryDatabase,
    pub repo: OfflineItemsRepository<DynItemStore>,
    dir: Option<TempDir>,
}

impl TestFixture {
    /// Create a fixture with the default notify policy.
    pub fn new(backend: Backend) -> Self {
        Self::with_policy(backend, NotifyPolicy::default())
    }

    /// Create a fixture with an explicit notify policy.
    pub fn with_policy(backend: Backend, notify: NotifyPolicy) -> Self {
        let (config, dir) = match backend {
            Backend::Memory => (InventoryConfig::in_memory(), None),
            Backend::Sqlite => {
                let dir = tempfile::tempdir().expect("create temp dir");
                (InventoryConfig::file(dir.path().join("item_database")), Some(dir))
            }
        };

        let db = InventoryDatabase::open(config.with_notify(notify)).expect("open database");
        let repo = db.items_repository();

        Self {
            backend,
            db,
            repo,
            dir,
        }
    }

    /// Directory holding the SQLite file, if any.
    pub fn dir(&self) -> Option<&std::path::Path> {
        self.dir.as_ref().map(|d| d.path())
    }

    /// Every row, taken from the first emission of a fresh live query.
    pub async fn snapshot(&self) -> Vec<Item> {
        let mut all = self.repo.get_all_items_stream();
        next_emission(&mut all).await
    }
}

/// Wait for the next successful emission of a live query.
///
/// Panics on timeout, on end of stream, or if the emission is an error.
pub async fn next_emission<S, T, E>(stream: &mut S) -> T
where
    S: Stream<Item = Result<T, E>> + Unpin,
    E: std::fmt::Debug,
{
    tokio::time::timeout(EMISSION_TIMEOUT, stream.next())
        .await
        .expect("timed out waiting for emission")
        .expect("stream ended")
        .expect("emission was an error")
}

/// Assert that a live query emits nothing for `quiet_for`.
pub async fn expect_quiet<S, T, E>(stream: &mut S, quiet_for: Duration)
where
    S: Stream<Item = Result<T, E>> + Unpin,
    T: std::fmt::Debug,
    E: std::fmt::Debug,
{
    if let Ok(emission) = tokio::time::timeout(quiet_for, stream.next()).await {
        panic!("expected no emission, got {:?}", emission);
    }
}

/// Install a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .try_init();
    });
}
