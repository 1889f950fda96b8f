use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{Category, Product};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub category: Category,
    pub items: Vec<Product>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ProductSearchQuery {
    /// Case-insensitive substring of the product name.
    pub q: Option<String>,
}
