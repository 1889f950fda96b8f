use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        items::{AddItemsRequest, CompletedShopping, ItemList},
        lists::{ListCollection, ListDetail},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{ItemPatch, ListItem, ListPatch, NewList, ShoppingList},
    response::ApiResponse,
    services::{item_service, list_service},
    state::AppState,
    summary::ListSummary,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lists).post(create_list))
        .route("/{id}", get(get_list).put(update_list).delete(delete_list))
        .route("/{id}/items", get(list_items).post(add_items))
        .route("/{id}/items/{item_id}", put(update_item).delete(delete_item))
        .route("/{id}/summary", get(list_summary))
        .route("/{id}/completed", get(complete_shopping))
}

#[utoipa::path(
    get,
    path = "/api/lists",
    responses(
        (status = 200, description = "Lists of the current user, newest first", body = ApiResponse<ListCollection>)
    ),
    security(("bearer_auth" = [])),
    tag = "Lists"
)]
pub async fn list_lists(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ListCollection>>> {
    let resp = list_service::list_lists(&state.lists, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/lists",
    request_body = NewList,
    responses(
        (status = 201, description = "Create list", body = ApiResponse<ShoppingList>),
        (status = 400, description = "Blank or too long title/description")
    ),
    security(("bearer_auth" = [])),
    tag = "Lists"
)]
pub async fn create_list(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<NewList>,
) -> AppResult<(StatusCode, Json<ApiResponse<ShoppingList>>)> {
    let resp = list_service::create_list(&state.lists, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/lists/{id}",
    params(("id" = Uuid, Path, description = "List ID")),
    responses(
        (status = 200, description = "List with its in-progress summary", body = ApiResponse<ListDetail>),
        (status = 404, description = "List not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lists"
)]
pub async fn get_list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ListDetail>>> {
    let resp = list_service::get_list(&state.lists, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/lists/{id}",
    params(("id" = Uuid, Path, description = "List ID")),
    request_body = ListPatch,
    responses(
        (status = 200, description = "Updated list", body = ApiResponse<ShoppingList>),
        (status = 400, description = "Invalid patch"),
        (status = 404, description = "List not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lists"
)]
pub async fn update_list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ListPatch>,
) -> AppResult<Json<ApiResponse<ShoppingList>>> {
    let resp = list_service::update_list(&state.lists, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/lists/{id}",
    params(("id" = Uuid, Path, description = "List ID")),
    responses(
        (status = 200, description = "List and its items deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "List not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Lists"
)]
pub async fn delete_list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = list_service::delete_list(&state.lists, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/lists/{id}/items",
    params(("id" = Uuid, Path, description = "List ID")),
    responses(
        (status = 200, description = "Items of the list, newest first", body = ApiResponse<ItemList>),
        (status = 404, description = "List not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    let resp = item_service::list_items(&state.lists, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/lists/{id}/items",
    params(("id" = Uuid, Path, description = "List ID")),
    request_body = AddItemsRequest,
    responses(
        (status = 201, description = "Items added", body = ApiResponse<ItemList>),
        (status = 400, description = "Missing price, bad quantity or unknown category"),
        (status = 404, description = "List not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn add_items(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddItemsRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ItemList>>)> {
    let resp = item_service::add_items(&state.lists, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/lists/{id}/items/{item_id}",
    params(
        ("id" = Uuid, Path, description = "List ID"),
        ("item_id" = Uuid, Path, description = "Item ID")
    ),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Updated item", body = ApiResponse<ListItem>),
        (status = 400, description = "Invalid patch"),
        (status = 404, description = "Item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ItemPatch>,
) -> AppResult<Json<ApiResponse<ListItem>>> {
    let resp = item_service::update_item(&state.lists, &user, id, item_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/lists/{id}/items/{item_id}",
    params(
        ("id" = Uuid, Path, description = "List ID"),
        ("item_id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = item_service::delete_item(&state.lists, &user, id, item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/lists/{id}/summary",
    params(("id" = Uuid, Path, description = "List ID")),
    responses(
        (status = 200, description = "Category breakdown of what is left to pay", body = ApiResponse<ListSummary>),
        (status = 404, description = "List not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn list_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ListSummary>>> {
    let resp = item_service::list_summary(&state.lists, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/lists/{id}/completed",
    params(("id" = Uuid, Path, description = "List ID")),
    responses(
        (status = 200, description = "Completed-trip summary and share text", body = ApiResponse<CompletedShopping>),
        (status = 400, description = "No completed items"),
        (status = 404, description = "List not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
pub async fn complete_shopping(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CompletedShopping>>> {
    let resp = item_service::complete_shopping(&state.lists, &user, id).await?;
    Ok(Json(resp))
}
