use crate::{
    catalog::{Catalog, CategoryLookup},
    dto::catalog::{CategoryList, ProductList, ProductSearchQuery},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
};

pub fn list_categories(catalog: &Catalog) -> ApiResponse<CategoryList> {
    let items = catalog.categories().to_vec();
    let meta = Meta::total(items.len() as i64);
    ApiResponse::success("Categories", CategoryList { items }, Some(meta))
}

pub fn list_products(
    catalog: &Catalog,
    category_id: &str,
    query: ProductSearchQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let category = catalog.category(category_id).ok_or(AppError::NotFound)?;
    let items: Vec<_> = catalog
        .search_products(category_id, query.q.as_deref().unwrap_or_default())
        .unwrap_or_default()
        .into_iter()
        .cloned()
        .collect();
    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Products",
        ProductList {
            category: category.clone(),
            items,
        },
        Some(meta),
    ))
}
