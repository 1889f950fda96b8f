//! Data access for shopping lists and their items.
//!
//! Every call is scoped to the owning user: ids belonging to someone else behave
//! exactly like ids that do not exist and yield [`AppError::NotFound`].
//!
//! [`AppError::NotFound`]: crate::error::AppError::NotFound

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ItemPatch, ListItem, ListPatch, ListWithItemCount, NewList, NewListItem, ShoppingList},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryListStore;
pub use postgres::PgListStore;

#[async_trait]
pub trait ListStore: Send + Sync {
    /// Short name used in logs.
    fn backend_tag(&self) -> &'static str;

    async fn create_list(&self, owner: Uuid, list: NewList) -> AppResult<ShoppingList>;

    async fn get_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<ShoppingList>;

    async fn update_list(&self, owner: Uuid, list_id: Uuid, patch: ListPatch)
        -> AppResult<ShoppingList>;

    /// Removes the list and, through the store's cascade, all of its items.
    async fn delete_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<()>;

    /// Lists of `owner`, newest first, each with its item count.
    async fn lists_with_item_count(&self, owner: Uuid) -> AppResult<Vec<ListWithItemCount>>;

    /// Items of a list, newest first.
    async fn list_items(&self, owner: Uuid, list_id: Uuid) -> AppResult<Vec<ListItem>>;

    /// Inserts all items or none.
    async fn insert_items(
        &self,
        owner: Uuid,
        list_id: Uuid,
        items: Vec<NewListItem>,
    ) -> AppResult<Vec<ListItem>>;

    async fn update_item(
        &self,
        owner: Uuid,
        list_id: Uuid,
        item_id: Uuid,
        patch: ItemPatch,
    ) -> AppResult<ListItem>;

    async fn delete_item(&self, owner: Uuid, list_id: Uuid, item_id: Uuid) -> AppResult<()>;
}
