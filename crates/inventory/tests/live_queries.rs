//! Live query behaviour through the public API: concurrency, cancellation,
//! notify policy, and durability.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use inventory::{InventoryConfig, InventoryDatabase, Item, ItemsRepository, NotifyPolicy};
use inventory_testkit::{expect_quiet, init_tracing, next_emission, Backend, TestFixture};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_are_serialized() {
    init_tracing();
    for backend in Backend::ALL {
        let fixture = TestFixture::new(backend);
        let repo = Arc::new(fixture.repo.clone());

        let mut all = repo.get_all_items_stream();
        assert!(next_emission(&mut all).await.is_empty());

        let writers: Vec<_> = (0..20)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert_item(&Item::new(format!("item {:02}", i), 1.0, i))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for writer in writers {
            assert!(writer.await.unwrap().is_applied());
        }

        // Emissions only ever grow, and the last one has every row.
        let mut seen = 0;
        while seen < 20 {
            let items = next_emission(&mut all).await;
            assert!(items.len() > seen, "{:?}: emission went backwards", backend);
            seen = items.len();
        }

        let snapshot = fixture.snapshot().await;
        let ids: HashSet<_> = snapshot.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 20);
    }
}

#[tokio::test]
async fn test_unsubscribe_releases_producer() {
    let fixture = TestFixture::new(Backend::Sqlite);

    let mut all = fixture.repo.get_all_items_stream();
    let mut one = fixture.repo.get_item_stream(1.into());
    next_emission(&mut all).await;
    next_emission(&mut one).await;
    assert_eq!(fixture.db.subscriber_count(), 2);

    drop(all);
    drop(one);

    tokio::time::timeout(Duration::from_secs(5), async {
        while fixture.db.subscriber_count() > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("live query producer leaked");

    // Writes still succeed with nobody listening.
    fixture
        .repo
        .insert_item(&Item::new("after", 1.0, 1))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_abandoned_writes_complete_and_notify() {
    for backend in Backend::ALL {
        let fixture = TestFixture::new(backend);
        let mut all = fixture.repo.get_all_items_stream();
        assert!(next_emission(&mut all).await.is_empty());

        {
            let item = Item::new("Widget", 9.99, 5);
            let write = fixture.repo.insert_item(&item);
            futures::pin_mut!(write);
            let _ = futures::poll!(write.as_mut());
        }

        let items = next_emission(&mut all).await;
        assert_eq!(items.len(), 1, "{:?}", backend);
        assert_eq!(items[0].name, "Widget");

        let id = items[0].id;
        {
            let write = fixture.repo.delete_item(&items[0]);
            futures::pin_mut!(write);
            let _ = futures::poll!(write.as_mut());
        }

        assert!(next_emission(&mut all).await.is_empty(), "{:?}", backend);
        assert!(fixture.snapshot().await.iter().all(|i| i.id != id));
    }
}

#[tokio::test]
async fn test_on_change_suppresses_identical_results() {
    let fixture = TestFixture::new(Backend::Memory);
    let id = fixture
        .repo
        .insert_item(&Item::new("Watched", 1.0, 1))
        .await
        .unwrap()
        .id()
        .unwrap();

    let mut watched = fixture.repo.get_item_stream(id);
    next_emission(&mut watched).await;

    fixture
        .repo
        .insert_item(&Item::new("Unrelated", 1.0, 1))
        .await
        .unwrap();
    expect_quiet(&mut watched, Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_every_write_policy_redelivers() {
    let fixture = TestFixture::with_policy(Backend::Sqlite, NotifyPolicy::EveryWrite);
    let id = fixture
        .repo
        .insert_item(&Item::new("Watched", 1.0, 1))
        .await
        .unwrap()
        .id()
        .unwrap();

    let mut watched = fixture.repo.get_item_stream(id);
    let first = next_emission(&mut watched).await;

    fixture
        .repo
        .insert_item(&Item::new("Unrelated", 1.0, 1))
        .await
        .unwrap();
    assert_eq!(next_emission(&mut watched).await, first);
}

#[tokio::test]
async fn test_independent_subscribers_each_see_writes() {
    let fixture = TestFixture::new(Backend::Memory);
    let mut first = fixture.repo.get_all_items_stream();
    let mut second = fixture.repo.get_all_items_stream();
    next_emission(&mut first).await;
    next_emission(&mut second).await;

    fixture
        .repo
        .insert_item(&Item::new("shared", 1.0, 1))
        .await
        .unwrap();

    assert_eq!(next_emission(&mut first).await.len(), 1);
    assert_eq!(next_emission(&mut second).await.len(), 1);
}

#[tokio::test]
async fn test_streams_end_when_database_closes() {
    let db = InventoryDatabase::open(InventoryConfig::in_memory()).unwrap();
    let repo = db.items_repository();
    let mut all = repo.get_all_items_stream();
    next_emission(&mut all).await;

    drop(repo);
    drop(db);

    let end = tokio::time::timeout(Duration::from_secs(5), all.next())
        .await
        .unwrap();
    assert!(end.is_none());
}

#[tokio::test]
async fn test_reopened_database_continues_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("item_database");

    let first = {
        let db = InventoryDatabase::open(InventoryConfig::file(&path)).unwrap();
        let repo = db.items_repository();
        let id = repo
            .insert_item(&Item::new("a", 1.0, 1))
            .await
            .unwrap()
            .id()
            .unwrap();
        repo.delete_item(&Item::new("a", 1.0, 1).with_id(id))
            .await
            .unwrap();
        id
    };

    let db = InventoryDatabase::open(InventoryConfig::file(&path)).unwrap();
    let repo = db.items_repository();
    let second = repo
        .insert_item(&Item::new("b", 1.0, 1))
        .await
        .unwrap()
        .id()
        .unwrap();
    assert!(second > first);

    let mut all = repo.get_all_items_stream();
    let items = next_emission(&mut all).await;
    assert_eq!(items, vec![Item::new("b", 1.0, 1).with_id(second)]);
}
