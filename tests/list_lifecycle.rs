use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shopping_list_api::{
    controller::ListController,
    error::{AppError, AppResult},
    models::{
        ItemPatch, ListItem, ListPatch, ListWithItemCount, NewList, NewListItem, ShoppingList,
    },
    store::{ListStore, MemoryListStore},
};
use tokio::sync::Notify;
use uuid::Uuid;

fn new_list(title: &str) -> NewList {
    NewList {
        title: title.to_string(),
        description: None,
    }
}

fn priced(title: &str, price: i64) -> NewListItem {
    NewListItem {
        title: title.to_string(),
        quantity: 1,
        category_id: "dry-foods".into(),
        category_name: "Kuru Gıdalar & Bakliyat".into(),
        unit_price: Decimal::from(price),
    }
}

fn setup() -> (Arc<MemoryListStore>, ListController) {
    let store = Arc::new(MemoryListStore::new());
    let controller = ListController::new(store.clone(), Uuid::new_v4());
    (store, controller)
}

#[tokio::test]
async fn created_list_shows_up_with_zero_items() -> anyhow::Result<()> {
    let (_store, controller) = setup();

    let created = controller
        .create(NewList {
            title: "  Haftalık alışveriş ".into(),
            description: Some("   ".into()),
        })
        .await?;
    assert_eq!(created.title, "Haftalık alışveriş");
    assert_eq!(created.description, None);

    let cached = controller.find(created.id).expect("cached after create");
    assert_eq!(cached.item_count, 0);

    controller.refresh().await?;
    let lists = controller.lists();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].list.id, created.id);
    assert_eq!(lists[0].item_count, 0);
    assert!(controller.is_loaded());
    Ok(())
}

#[tokio::test]
async fn overlong_title_is_rejected_before_any_store_call() {
    let (store, controller) = setup();

    let result = controller.create(new_list(&"x".repeat(51))).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(store.calls(), 0);
    assert!(controller.lists().is_empty());
}

#[tokio::test]
async fn fifty_character_title_is_accepted() -> anyhow::Result<()> {
    let (_store, controller) = setup();
    let created = controller.create(new_list(&"ş".repeat(50))).await?;
    assert_eq!(created.title.chars().count(), 50);
    Ok(())
}

#[tokio::test]
async fn blank_title_and_long_description_are_rejected() {
    let (store, controller) = setup();

    let blank = controller.create(new_list("   ")).await;
    assert!(matches!(blank, Err(AppError::Validation(_))));

    let long = controller
        .create(NewList {
            title: "Market".into(),
            description: Some("d".repeat(201)),
        })
        .await;
    assert!(matches!(long, Err(AppError::Validation(_))));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn store_fault_surfaces_as_remote_error_and_leaves_cache_alone() {
    let (store, controller) = setup();
    store.fail_next("connection reset by peer");

    let result = controller.create(new_list("Market")).await;

    match result {
        Err(AppError::Remote(message)) => assert_eq!(message, "connection reset by peer"),
        other => panic!("expected remote error, got {other:?}"),
    }
    assert!(controller.lists().is_empty());

    // no automatic retry happened
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn update_keeps_cached_item_count() -> anyhow::Result<()> {
    let (store, controller) = setup();
    let list = controller.create(new_list("Market")).await?;
    store
        .insert_items(
            controller.owner(),
            list.id,
            vec![priced("Nohut", 30), priced("Barbunya", 45)],
        )
        .await?;
    controller.refresh().await?;
    assert_eq!(controller.find(list.id).map(|e| e.item_count), Some(2));

    let updated = controller
        .update(
            list.id,
            ListPatch {
                title: Some("Pazar".into()),
                description: Some("Sabah".into()),
            },
        )
        .await?;
    assert_eq!(updated.title, "Pazar");

    let cached = controller.find(list.id).expect("still cached");
    assert_eq!(cached.list.title, "Pazar");
    assert_eq!(cached.list.description.as_deref(), Some("Sabah"));
    assert_eq!(cached.item_count, 2);
    Ok(())
}

#[tokio::test]
async fn empty_patch_is_a_validation_error() {
    let (store, controller) = setup();
    let result = controller.update(Uuid::new_v4(), ListPatch::default()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn delete_cascades_and_second_delete_is_not_found() -> anyhow::Result<()> {
    let (store, controller) = setup();
    let list = controller.create(new_list("Market")).await?;
    store
        .insert_items(controller.owner(), list.id, vec![priced("Tuz", 12)])
        .await?;

    controller.delete(list.id).await?;
    assert!(controller.find(list.id).is_none());

    let items = store.list_items(controller.owner(), list.id).await;
    assert!(matches!(items, Err(AppError::NotFound)));

    let again = controller.delete(list.id).await;
    assert!(matches!(again, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn lists_of_other_users_are_invisible() -> anyhow::Result<()> {
    let store = Arc::new(MemoryListStore::new());
    let alice = ListController::new(store.clone(), Uuid::new_v4());
    let bob = ListController::new(store.clone(), Uuid::new_v4());

    let list = alice.create(new_list("Alice")).await?;

    bob.refresh().await?;
    assert!(bob.lists().is_empty());
    assert!(matches!(bob.delete(list.id).await, Err(AppError::NotFound)));

    alice.refresh().await?;
    assert_eq!(alice.lists().len(), 1);
    Ok(())
}

#[tokio::test]
async fn lists_are_newest_first() -> anyhow::Result<()> {
    let (_store, controller) = setup();
    let first = controller.create(new_list("first")).await?;
    let second = controller.create(new_list("second")).await?;

    let cached: Vec<Uuid> = controller.lists().iter().map(|e| e.list.id).collect();
    assert_eq!(cached, vec![second.id, first.id]);

    controller.refresh().await?;
    let fetched: Vec<Uuid> = controller.lists().iter().map(|e| e.list.id).collect();
    assert_eq!(fetched, vec![second.id, first.id]);
    Ok(())
}

/// Holds list fetches until released.
struct GatedStore {
    inner: Arc<MemoryListStore>,
    gate: Arc<Notify>,
}

#[async_trait]
impl ListStore for GatedStore {
    fn backend_tag(&self) -> &'static str {
        "gated"
    }

    async fn create_list(&self, owner: Uuid, list: NewList) -> AppResult<ShoppingList> {
        self.inner.create_list(owner, list).await
    }

    async fn get_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<ShoppingList> {
        self.inner.get_list(owner, list_id).await
    }

    async fn update_list(
        &self,
        owner: Uuid,
        list_id: Uuid,
        patch: ListPatch,
    ) -> AppResult<ShoppingList> {
        self.inner.update_list(owner, list_id, patch).await
    }

    async fn delete_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<()> {
        self.inner.delete_list(owner, list_id).await
    }

    async fn lists_with_item_count(&self, owner: Uuid) -> AppResult<Vec<ListWithItemCount>> {
        self.gate.notified().await;
        self.inner.lists_with_item_count(owner).await
    }

    async fn list_items(&self, owner: Uuid, list_id: Uuid) -> AppResult<Vec<ListItem>> {
        self.inner.list_items(owner, list_id).await
    }

    async fn insert_items(
        &self,
        owner: Uuid,
        list_id: Uuid,
        items: Vec<NewListItem>,
    ) -> AppResult<Vec<ListItem>> {
        self.inner.insert_items(owner, list_id, items).await
    }

    async fn update_item(
        &self,
        owner: Uuid,
        list_id: Uuid,
        item_id: Uuid,
        patch: ItemPatch,
    ) -> AppResult<ListItem> {
        self.inner.update_item(owner, list_id, item_id, patch).await
    }

    async fn delete_item(&self, owner: Uuid, list_id: Uuid, item_id: Uuid) -> AppResult<()> {
        self.inner.delete_item(owner, list_id, item_id).await
    }
}

#[tokio::test]
async fn response_arriving_after_deactivate_is_discarded() -> anyhow::Result<()> {
    let inner = Arc::new(MemoryListStore::new());
    let gate = Arc::new(Notify::new());
    let owner = Uuid::new_v4();
    inner.create_list(owner, new_list("Market")).await?;

    let controller = ListController::new(
        Arc::new(GatedStore {
            inner: inner.clone(),
            gate: gate.clone(),
        }),
        owner,
    );

    let (refreshed, ()) = tokio::join!(controller.refresh(), async {
        controller.deactivate();
        gate.notify_one();
    });
    refreshed?;

    assert!(!controller.is_active());
    assert!(!controller.is_loaded());
    assert!(controller.lists().is_empty());

    // Regaining focus reloads and applies again.
    gate.notify_one();
    controller.focus().await?;
    assert!(controller.is_active());
    assert_eq!(controller.lists().len(), 1);
    Ok(())
}
