use axum::{
    Json, Router,
    extract::{Path, Query},
    routing::get,
};

use crate::{
    catalog::Catalog,
    dto::catalog::{CategoryList, ProductList, ProductSearchQuery},
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/products", get(list_products))
}

#[utoipa::path(
    get,
    path = "/api/catalog/categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<CategoryList>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories() -> Json<ApiResponse<CategoryList>> {
    Json(catalog_service::list_categories(Catalog::builtin()))
}

#[utoipa::path(
    get,
    path = "/api/catalog/categories/{id}/products",
    params(
        ("id" = String, Path, description = "Category ID"),
        ProductSearchQuery
    ),
    responses(
        (status = 200, description = "Products of a category", body = ApiResponse<ProductList>),
        (status = 404, description = "Category not found")
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    Path(id): Path<String>,
    Query(query): Query<ProductSearchQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_products(Catalog::builtin(), &id, query)?;
    Ok(Json(resp))
}
