//! List endpoints. The HTTP surface keeps no per-user state between requests: each
//! handler runs a [`ListController`] scoped to that one request, so its validation and
//! store calls apply but its cache is dropped when the response is sent. Long-lived
//! controllers with refresh and deactivate belong to embedding clients.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    catalog::Catalog,
    controller::ListController,
    dto::lists::{ListCollection, ListDetail},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{ListPatch, NewList, ShoppingList},
    response::{ApiResponse, Meta},
    store::ListStore,
    summary::summarize,
};

pub async fn list_lists(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
) -> AppResult<ApiResponse<ListCollection>> {
    let controller = ListController::new(store.clone(), user.user_id);
    controller.refresh().await?;
    let items = controller.lists();
    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("OK", ListCollection { items }, Some(meta)))
}

pub async fn create_list(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    payload: NewList,
) -> AppResult<ApiResponse<ShoppingList>> {
    let controller = ListController::new(store.clone(), user.user_id);
    let list = controller.create(payload).await?;
    tracing::info!(user_id = %user.user_id, list_id = %list.id, "list created");
    Ok(ApiResponse::success("List created", list, Some(Meta::empty())))
}

pub async fn get_list(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
) -> AppResult<ApiResponse<ListDetail>> {
    let list = store.get_list(user.user_id, list_id).await?;
    let items = store.list_items(user.user_id, list_id).await?;
    let summary = summarize(&items, Catalog::builtin());
    let meta = Meta::counts(summary.item_count as i64, summary.completed_count as i64);
    Ok(ApiResponse::success(
        "OK",
        ListDetail { list, summary },
        Some(meta),
    ))
}

pub async fn update_list(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
    payload: ListPatch,
) -> AppResult<ApiResponse<ShoppingList>> {
    let controller = ListController::new(store.clone(), user.user_id);
    let list = controller.update(list_id, payload).await?;
    Ok(ApiResponse::success("Updated", list, Some(Meta::empty())))
}

pub async fn delete_list(
    store: &Arc<dyn ListStore>,
    user: &AuthUser,
    list_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let controller = ListController::new(store.clone(), user.user_id);
    controller.delete(list_id).await?;
    tracing::info!(user_id = %user.user_id, list_id = %list_id, "list deleted");
    Ok(ApiResponse::success(
        "List deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
