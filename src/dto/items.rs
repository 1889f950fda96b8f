use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{ListItem, NewListItem},
    summary::ListSummary,
};

/// Products picked from one or more categories, each with its entered price.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemsRequest {
    pub items: Vec<NewListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemList {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompletedShopping {
    pub list_title: String,
    pub summary: ListSummary,
    pub share_text: String,
}
