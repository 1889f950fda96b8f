use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::{ListWithItemCount, ShoppingList},
    summary::ListSummary,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ListCollection {
    pub items: Vec<ListWithItemCount>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListDetail {
    pub list: ShoppingList,
    pub summary: ListSummary,
}
