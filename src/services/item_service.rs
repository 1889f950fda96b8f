use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    catalog::{Catalog, CategoryLookup},
    dto::items::{AddItemsRequest, CompletedShopping, ItemList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ItemPatch, ListItem, NewListItem, validate_price, validate_quantity},
    response::{ApiResponse, Meta},
    store::ListStore,
    summary::{ListSummary, completed_items, share_text, summarize, summarize_completed},
};

pub async fn list_items(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
) -> AppResult<ApiResponse<ItemList>> {
    let items = store.list_items(user.user_id, list_id).await?;
    let completed = items.iter().filter(|i| i.is_completed).count();
    let meta = Meta::counts(items.len() as i64, completed as i64);
    Ok(ApiResponse::success("OK", ItemList { items }, Some(meta)))
}

pub async fn add_items(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
    payload: AddItemsRequest,
) -> AppResult<ApiResponse<ItemList>> {
    let items = prepare_items(payload.items, Catalog::builtin())?;
    let inserted = store.insert_items(user.user_id, list_id, items).await?;
    tracing::info!(list_id = %list_id, count = inserted.len(), "items added");
    let meta = Meta::total(inserted.len() as i64);
    Ok(ApiResponse::success(
        "Items added",
        ItemList { items: inserted },
        Some(meta),
    ))
}

pub async fn update_item(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
    item_id: Uuid,
    payload: ItemPatch,
) -> AppResult<ApiResponse<ListItem>> {
    let patch = payload.validate()?;
    let item = store
        .update_item(user.user_id, list_id, item_id, patch)
        .await?;
    Ok(ApiResponse::success("Updated", item, Some(Meta::empty())))
}

pub async fn delete_item(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
    item_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    store.delete_item(user.user_id, list_id, item_id).await?;
    Ok(ApiResponse::success(
        "Item removed",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// What is still left to pay on the list.
pub async fn list_summary(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
) -> AppResult<ApiResponse<ListSummary>> {
    let items = store.list_items(user.user_id, list_id).await?;
    let summary = summarize(&items, Catalog::builtin());
    let meta = Meta::counts(summary.item_count as i64, summary.completed_count as i64);
    Ok(ApiResponse::success("OK", summary, Some(meta)))
}

/// Close the trip: price the completed items and render the share text.
pub async fn complete_shopping(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
) -> AppResult<ApiResponse<CompletedShopping>> {
    let list = store.get_list(user.user_id, list_id).await?;
    let items = store.list_items(user.user_id, list_id).await?;
    let done = completed_items(&items);
    if done.is_empty() {
        return Err(AppError::validation(
            "complete at least one item before finishing the trip",
        ));
    }

    let summary = summarize_completed(&done, Catalog::builtin());
    let share = share_text(&list.title, &summary);
    let meta = Meta::counts(summary.item_count as i64, summary.completed_count as i64);
    Ok(ApiResponse::success(
        "Shopping completed",
        CompletedShopping {
            list_title: list.title,
            summary,
            share_text: share,
        },
        Some(meta),
    ))
}

/// Check a batch of selections before anything reaches the store. Blank category
/// names are filled from the catalog.
pub fn prepare_items(
    items: Vec<NewListItem>,
    catalog: &impl CategoryLookup,
) -> AppResult<Vec<NewListItem>> {
    if items.is_empty() {
        return Err(AppError::validation("select at least one product"));
    }

    let unpriced = items
        .iter()
        .filter(|i| i.unit_price <= Decimal::ZERO)
        .count();
    if unpriced > 0 {
        return Err(AppError::validation(format!(
            "enter a price for {unpriced} product(s)"
        )));
    }

    items
        .into_iter()
        .map(|mut item| {
            validate_quantity(item.quantity)?;
            validate_price(item.unit_price)?;
            item.title = item.title.trim().to_string();
            if item.title.is_empty() {
                return Err(AppError::validation("item title must not be blank"));
            }
            item.category_id = item.category_id.trim().to_string();
            if item.category_name.trim().is_empty() {
                let category = catalog.category(&item.category_id).ok_or_else(|| {
                    AppError::validation(format!("unknown category {}", item.category_id))
                })?;
                item.category_name = category.name.clone();
            }
            Ok(item)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(category_id: &str, category_name: &str, price: Decimal) -> NewListItem {
        NewListItem {
            title: " Nohut ".into(),
            quantity: 2,
            category_id: category_id.into(),
            category_name: category_name.into(),
            unit_price: price,
        }
    }

    #[test]
    fn missing_prices_are_counted() {
        let items = vec![
            selection("dry-foods", "", Decimal::ZERO),
            selection("dry-foods", "", Decimal::new(-1, 0)),
            selection("dry-foods", "", Decimal::new(1250, 2)),
        ];
        match prepare_items(items, Catalog::builtin()) {
            Err(AppError::Validation(msg)) => assert!(msg.contains("2 product")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn blank_category_name_is_filled_from_catalog() {
        let items = vec![selection("dry-foods", "", Decimal::new(3990, 2))];
        let prepared = prepare_items(items, Catalog::builtin()).expect("valid");
        assert_eq!(prepared[0].category_name, "Kuru Gıdalar & Bakliyat");
        assert_eq!(prepared[0].title, "Nohut");
    }

    #[test]
    fn unknown_category_keeps_given_name() {
        let items = vec![selection("custom", "Market", Decimal::ONE)];
        let prepared = prepare_items(items, Catalog::builtin()).expect("valid");
        assert_eq!(prepared[0].category_name, "Market");
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(matches!(
            prepare_items(Vec::new(), Catalog::builtin()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn oversized_or_overprecise_price_is_rejected() {
        let huge = selection("dry-foods", "Dry", Decimal::MAX);
        assert!(matches!(
            prepare_items(vec![huge], Catalog::builtin()),
            Err(AppError::Validation(_))
        ));
        let fractional = selection("dry-foods", "Dry", Decimal::new(12345, 3));
        assert!(matches!(
            prepare_items(vec![fractional], Catalog::builtin()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut item = selection("dry-foods", "Dry", Decimal::ONE);
        item.quantity = 0;
        assert!(matches!(
            prepare_items(vec![item], Catalog::builtin()),
            Err(AppError::Validation(_))
        ));
    }
}
