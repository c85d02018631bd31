//! Repository contract, checked against every implementation: the SQLite
//! and in-memory backends behind `OfflineItemsRepository`, and the testkit
//! fake.

use std::collections::HashSet;

use inventory::{InsertResult, Item, ItemId, ItemsRepository, WriteResult};
use inventory_testkit::{init_tracing, next_emission, Backend, FakeItemsRepository, TestFixture};

/// Run `check` against each repository implementation.
async fn for_each_repository<F, Fut>(check: F)
where
    F: Fn(Box<dyn ItemsRepository>, &'static str) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    init_tracing();
    for backend in Backend::ALL {
        let fixture = TestFixture::new(backend);
        let name = match backend {
            Backend::Memory => "memory",
            Backend::Sqlite => "sqlite",
        };
        let repo: Box<dyn ItemsRepository> = Box::new(fixture.repo.clone());
        check(repo, name).await;
    }
    let fake: Box<dyn ItemsRepository> = Box::new(FakeItemsRepository::new());
    check(fake, "fake").await;
}

/// Current rows, via a fresh subscription.
async fn snapshot(repo: &dyn ItemsRepository) -> Vec<Item> {
    let mut all = repo.get_all_items_stream();
    next_emission(&mut all).await
}

async fn insert(repo: &dyn ItemsRepository, item: Item) -> ItemId {
    repo.insert_item(&item)
        .await
        .unwrap()
        .id()
        .expect("insert was ignored")
}

#[tokio::test]
async fn test_ids_are_unique() {
    for_each_repository(|repo, name| async move {
        for i in 0..10 {
            insert(&*repo, Item::new(format!("item {}", i % 3), 1.0, i)).await;
        }
        repo.insert_item(&Item::new("explicit", 1.0, 1).with_id(3))
            .await
            .unwrap();

        let items = snapshot(&*repo).await;
        let ids: HashSet<ItemId> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), items.len(), "{}: duplicate ids", name);
        assert_eq!(items.len(), 10, "{}", name);
    })
    .await;
}

#[tokio::test]
async fn test_conflicting_insert_is_silently_ignored() {
    for_each_repository(|repo, name| async move {
        let original = Item::new("Original", 5.0, 5);
        let id = insert(&*repo, original.clone()).await;

        let result = repo
            .insert_item(&Item::new("Replacement", 1.0, 1).with_id(id))
            .await
            .unwrap();

        assert_eq!(result, InsertResult::Ignored, "{}", name);
        assert_eq!(snapshot(&*repo).await, vec![original.with_id(id)], "{}", name);
    })
    .await;
}

#[tokio::test]
async fn test_update_replaces_row_by_id() {
    for_each_repository(|repo, name| async move {
        let id = insert(&*repo, Item::new("Widget", 9.99, 5)).await;
        let other = insert(&*repo, Item::new("Gadget", 1.0, 1)).await;

        let replacement = Item::new("Sprocket", 0.25, 12).with_id(id);
        assert_eq!(
            repo.update_item(&replacement).await.unwrap(),
            WriteResult::Applied,
            "{}",
            name
        );

        let before = snapshot(&*repo).await;
        assert_eq!(
            before,
            vec![Item::new("Gadget", 1.0, 1).with_id(other), replacement],
            "{}",
            name
        );

        let ghost = Item::new("Ghost", 1.0, 1).with_id(999);
        assert_eq!(
            repo.update_item(&ghost).await.unwrap(),
            WriteResult::NotFound,
            "{}",
            name
        );
        assert_eq!(snapshot(&*repo).await, before, "{}", name);
    })
    .await;
}

#[tokio::test]
async fn test_delete_removes_exactly_one_row() {
    for_each_repository(|repo, name| async move {
        let a = insert(&*repo, Item::new("a", 1.0, 1)).await;
        let b = insert(&*repo, Item::new("b", 1.0, 1)).await;

        assert_eq!(
            repo.delete_item(&Item::new("a", 1.0, 1).with_id(a))
                .await
                .unwrap(),
            WriteResult::Applied,
            "{}",
            name
        );
        let after = snapshot(&*repo).await;
        assert_eq!(after, vec![Item::new("b", 1.0, 1).with_id(b)], "{}", name);

        assert_eq!(
            repo.delete_item(&Item::new("a", 1.0, 1).with_id(a))
                .await
                .unwrap(),
            WriteResult::NotFound,
            "{}",
            name
        );
        assert_eq!(snapshot(&*repo).await, after, "{}", name);
    })
    .await;
}

#[tokio::test]
async fn test_live_list_sees_new_item() {
    for_each_repository(|repo, name| async move {
        insert(&*repo, Item::new("Zebra", 3.0, 1)).await;
        insert(&*repo, Item::new("Anvil", 2.0, 1)).await;

        let mut all = repo.get_all_items_stream();
        assert_eq!(next_emission(&mut all).await.len(), 2, "{}", name);

        repo.insert_item(&Item::new("Widget", 9.99, 5))
            .await
            .unwrap();

        let items = next_emission(&mut all).await;
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Anvil", "Widget", "Zebra"], "{}", name);

        let widget = &items[1];
        assert!(!widget.id.is_unassigned(), "{}", name);
        assert_eq!(widget.price, 9.99, "{}", name);
        assert_eq!(widget.quantity, 5, "{}", name);
    })
    .await;
}

#[tokio::test]
async fn test_missing_id_emits_none() {
    for_each_repository(|repo, name| async move {
        let mut item = repo.get_item_stream(ItemId::new(999));
        assert_eq!(next_emission(&mut item).await, None, "{}", name);
    })
    .await;
}

#[tokio::test]
async fn test_list_stays_sorted_by_name() {
    for_each_repository(|repo, name| async move {
        let mut all = repo.get_all_items_stream();
        next_emission(&mut all).await;

        insert(&*repo, Item::new("Banana", 1.0, 1)).await;
        let items = next_emission(&mut all).await;
        assert_eq!(items.len(), 1, "{}", name);

        insert(&*repo, Item::new("Apple", 1.0, 1)).await;
        let names: Vec<String> = next_emission(&mut all)
            .await
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Apple", "Banana"], "{}", name);
    })
    .await;
}

#[tokio::test]
async fn test_inserted_item_reads_back_by_id() {
    for_each_repository(|repo, name| async move {
        let item = Item::new("Round Trip", 12.5, 7);
        let id = insert(&*repo, item.clone()).await;

        let mut stream = repo.get_item_stream(id);
        assert_eq!(
            next_emission(&mut stream).await,
            Some(item.with_id(id)),
            "{}",
            name
        );
    })
    .await;
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    for_each_repository(|repo, name| async move {
        let first = insert(&*repo, Item::new("a", 1.0, 1)).await;
        repo.delete_item(&Item::new("a", 1.0, 1).with_id(first))
            .await
            .unwrap();
        let second = insert(&*repo, Item::new("b", 1.0, 1)).await;
        assert!(second > first, "{}: {:?} reused", name, second);
    })
    .await;
}
