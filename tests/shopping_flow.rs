use std::sync::Arc;

use rust_decimal::Decimal;
use shopping_list_api::{
    dto::items::AddItemsRequest,
    error::AppError,
    middleware::auth::AuthUser,
    models::{ItemPatch, NewList, NewListItem},
    services::{item_service, list_service},
    store::{ListStore, MemoryListStore},
    summary::PricingView,
};
use uuid::Uuid;

fn selection(title: &str, category_id: &str, price: i64, quantity: i32) -> NewListItem {
    NewListItem {
        title: title.to_string(),
        quantity,
        category_id: category_id.to_string(),
        category_name: String::new(),
        unit_price: Decimal::from(price),
    }
}

async fn list_with_items(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
) -> anyhow::Result<(Uuid, Vec<Uuid>)> {
    let created = list_service::create_list(
        store,
        user,
        NewList {
            title: "Market".into(),
            description: None,
        },
    )
    .await?;
    let list_id = created.data.map(|l| l.id).expect("created list");

    let added = item_service::add_items(
        store,
        user,
        list_id,
        AddItemsRequest {
            items: vec![
                selection("Nohut", "dry-foods", 10, 1),
                selection("Un", "basic-foods", 20, 3),
            ],
        },
    )
    .await?;
    let ids = added
        .data
        .map(|d| d.items.into_iter().map(|i| i.id).collect())
        .unwrap_or_default();
    Ok((list_id, ids))
}

fn setup() -> (Arc<dyn ListStore>, AuthUser) {
    let store: Arc<dyn ListStore> = Arc::new(MemoryListStore::new());
    let user = AuthUser {
        user_id: Uuid::new_v4(),
    };
    (store, user)
}

#[tokio::test]
async fn added_items_get_category_names_and_start_incomplete() -> anyhow::Result<()> {
    let (store, user) = setup();
    let (list_id, ids) = list_with_items(&store, &user).await?;
    assert_eq!(ids.len(), 2);

    let listed = item_service::list_items(&store, &user, list_id).await?;
    let items = listed.data.expect("items").items;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| !i.is_completed));
    assert!(
        items
            .iter()
            .any(|i| i.category_name == "Kuru Gıdalar & Bakliyat")
    );

    let lists = list_service::list_lists(&store, &user).await?;
    let entry = &lists.data.expect("lists").items[0];
    assert_eq!(entry.item_count, 2);
    Ok(())
}

#[tokio::test]
async fn toggling_moves_the_remaining_total() -> anyhow::Result<()> {
    let (store, user) = setup();
    let (list_id, ids) = list_with_items(&store, &user).await?;

    let before = item_service::list_summary(&store, &user, list_id)
        .await?
        .data
        .expect("summary");
    assert_eq!(before.view, PricingView::InProgress);
    assert_eq!(before.total_price, Decimal::from(30));
    assert_eq!(before.completed_count, 0);
    assert_eq!(before.categories.len(), 2);

    item_service::update_item(&store, &user, list_id, ids[0], ItemPatch::toggle(true)).await?;

    let after = item_service::list_summary(&store, &user, list_id)
        .await?
        .data
        .expect("summary");
    assert_eq!(after.total_price, Decimal::from(20));
    assert_eq!(after.completed_count, 1);
    assert_eq!(after.item_count, 2);
    Ok(())
}

#[tokio::test]
async fn finishing_requires_a_completed_item() -> anyhow::Result<()> {
    let (store, user) = setup();
    let (list_id, _) = list_with_items(&store, &user).await?;

    let result = item_service::complete_shopping(&store, &user, list_id).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn finished_trip_multiplies_quantities_and_renders_share_text() -> anyhow::Result<()> {
    let (store, user) = setup();
    let (list_id, ids) = list_with_items(&store, &user).await?;
    for id in &ids {
        item_service::update_item(&store, &user, list_id, *id, ItemPatch::toggle(true)).await?;
    }

    let done = item_service::complete_shopping(&store, &user, list_id)
        .await?
        .data
        .expect("completed");
    assert_eq!(done.list_title, "Market");
    assert_eq!(done.summary.view, PricingView::Completed);
    assert_eq!(done.summary.total_price, Decimal::from(70));
    assert!(done.share_text.starts_with("Market - Shopping summary"));
    assert!(done.share_text.ends_with("Total spent: ₺70.00"));
    Ok(())
}

#[tokio::test]
async fn unpriced_selection_never_reaches_the_store() -> anyhow::Result<()> {
    let store = Arc::new(MemoryListStore::new());
    let dyn_store: Arc<dyn ListStore> = store.clone();
    let user = AuthUser {
        user_id: Uuid::new_v4(),
    };

    let result = item_service::add_items(
        &dyn_store,
        &user,
        Uuid::new_v4(),
        AddItemsRequest {
            items: vec![selection("Nohut", "dry-foods", 0, 1)],
        },
    )
    .await;

    match result {
        Err(AppError::Validation(msg)) => assert!(msg.contains("1 product")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(store.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn items_of_another_users_list_are_not_found() -> anyhow::Result<()> {
    let (store, owner) = setup();
    let (list_id, ids) = list_with_items(&store, &owner).await?;
    let stranger = AuthUser {
        user_id: Uuid::new_v4(),
    };

    let listed = item_service::list_items(&store, &stranger, list_id).await;
    assert!(matches!(listed, Err(AppError::NotFound)));

    let toggled =
        item_service::update_item(&store, &stranger, list_id, ids[0], ItemPatch::toggle(true))
            .await;
    assert!(matches!(toggled, Err(AppError::NotFound)));

    let removed = item_service::delete_item(&store, &stranger, list_id, ids[0]).await;
    assert!(matches!(removed, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn deleting_an_item_updates_the_detail_view() -> anyhow::Result<()> {
    let (store, user) = setup();
    let (list_id, ids) = list_with_items(&store, &user).await?;

    item_service::delete_item(&store, &user, list_id, ids[1]).await?;

    let detail = list_service::get_list(&store, &user, list_id)
        .await?
        .data
        .expect("detail");
    assert_eq!(detail.list.title, "Market");
    assert_eq!(detail.summary.item_count, 1);
    assert_eq!(detail.summary.total_price, Decimal::from(10));
    Ok(())
}

#[tokio::test]
async fn repricing_an_item_moves_the_remaining_total() -> anyhow::Result<()> {
    let (store, user) = setup();
    let (list_id, ids) = list_with_items(&store, &user).await?;

    let updated = item_service::update_item(
        &store,
        &user,
        list_id,
        ids[1],
        ItemPatch {
            unit_price: Some(Decimal::new(2550, 2)),
            quantity: Some(4),
            ..ItemPatch::default()
        },
    )
    .await?
    .data
    .expect("item");
    assert_eq!(updated.unit_price, Decimal::new(2550, 2));
    assert_eq!(updated.quantity, 4);
    assert!(!updated.is_completed);

    let summary = item_service::list_summary(&store, &user, list_id)
        .await?
        .data
        .expect("summary");
    assert_eq!(summary.total_price, Decimal::new(3550, 2));
    Ok(())
}

#[tokio::test]
async fn invalid_item_patches_never_reach_the_store() -> anyhow::Result<()> {
    let memory = Arc::new(MemoryListStore::new());
    let store: Arc<dyn ListStore> = memory.clone();
    let user = AuthUser {
        user_id: Uuid::new_v4(),
    };
    let (list_id, ids) = list_with_items(&store, &user).await?;
    let calls_before = memory.calls();

    let rejected = [
        ItemPatch::default(),
        ItemPatch {
            unit_price: Some(Decimal::ZERO),
            ..ItemPatch::default()
        },
        ItemPatch {
            unit_price: Some(Decimal::new(-1, 0)),
            ..ItemPatch::default()
        },
        ItemPatch {
            unit_price: Some(Decimal::MAX),
            ..ItemPatch::default()
        },
        ItemPatch {
            unit_price: Some(Decimal::new(12345, 3)),
            ..ItemPatch::default()
        },
        ItemPatch {
            quantity: Some(0),
            ..ItemPatch::default()
        },
        ItemPatch {
            quantity: Some(10_000),
            ..ItemPatch::default()
        },
    ];
    for patch in rejected {
        let result = item_service::update_item(&store, &user, list_id, ids[0], patch).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
    assert_eq!(memory.calls(), calls_before);

    let summary = item_service::list_summary(&store, &user, list_id)
        .await?
        .data
        .expect("summary");
    assert_eq!(summary.total_price, Decimal::from(30));
    Ok(())
}

#[tokio::test]
async fn overflowing_selection_is_rejected_before_the_store() -> anyhow::Result<()> {
    let memory = Arc::new(MemoryListStore::new());
    let store: Arc<dyn ListStore> = memory.clone();
    let user = AuthUser {
        user_id: Uuid::new_v4(),
    };
    let (list_id, _) = list_with_items(&store, &user).await?;
    let calls_before = memory.calls();

    let mut huge = selection("Nohut", "dry-foods", 1, 2);
    huge.unit_price = Decimal::MAX;
    let result = item_service::add_items(
        &store,
        &user,
        list_id,
        AddItemsRequest { items: vec![huge] },
    )
    .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(memory.calls(), calls_before);
    Ok(())
}
