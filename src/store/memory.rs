use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::ListStore;
use crate::{
    error::{AppError, AppResult},
    models::{ItemPatch, ListItem, ListPatch, ListWithItemCount, NewList, NewListItem, ShoppingList},
};

#[derive(Default)]
struct Tables {
    lists: Vec<ShoppingList>,
    items: Vec<ListItem>,
}

impl Tables {
    fn owned_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<&ShoppingList> {
        self.lists
            .iter()
            .find(|l| l.id == list_id && l.user_id == owner)
            .ok_or(AppError::NotFound)
    }
}

/// Process-local list store, kept in insertion order.
#[derive(Default)]
pub struct MemoryListStore {
    tables: Mutex<Tables>,
    calls: AtomicU64,
    fail_next: std::sync::Mutex<Option<String>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations attempted so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Make the next operation fail with a store error carrying `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(message.into());
        }
    }

    fn begin(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let injected = self.fail_next.lock().ok().and_then(|mut slot| slot.take());
        match injected {
            Some(message) => Err(AppError::Remote(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn create_list(&self, owner: Uuid, list: NewList) -> AppResult<ShoppingList> {
        self.begin()?;
        let created = ShoppingList {
            id: Uuid::new_v4(),
            user_id: owner,
            title: list.title,
            description: list.description,
            created_at: Utc::now(),
        };
        self.tables.lock().await.lists.push(created.clone());
        Ok(created)
    }

    async fn get_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<ShoppingList> {
        self.begin()?;
        let tables = self.tables.lock().await;
        tables.owned_list(owner, list_id).cloned()
    }

    async fn update_list(
        &self,
        owner: Uuid,
        list_id: Uuid,
        patch: ListPatch,
    ) -> AppResult<ShoppingList> {
        self.begin()?;
        let mut tables = self.tables.lock().await;
        let list = tables
            .lists
            .iter_mut()
            .find(|l| l.id == list_id && l.user_id == owner)
            .ok_or(AppError::NotFound)?;
        if let Some(title) = patch.title {
            list.title = title;
        }
        if let Some(description) = patch.description {
            list.description = Some(description).filter(|d| !d.is_empty());
        }
        Ok(list.clone())
    }

    async fn delete_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<()> {
        self.begin()?;
        let mut tables = self.tables.lock().await;
        tables.owned_list(owner, list_id)?;
        tables.lists.retain(|l| l.id != list_id);
        tables.items.retain(|i| i.list_id != list_id);
        Ok(())
    }

    async fn lists_with_item_count(&self, owner: Uuid) -> AppResult<Vec<ListWithItemCount>> {
        self.begin()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .lists
            .iter()
            .rev()
            .filter(|l| l.user_id == owner)
            .map(|l| ListWithItemCount {
                list: l.clone(),
                item_count: tables.items.iter().filter(|i| i.list_id == l.id).count() as i64,
            })
            .collect())
    }

    async fn list_items(&self, owner: Uuid, list_id: Uuid) -> AppResult<Vec<ListItem>> {
        self.begin()?;
        let tables = self.tables.lock().await;
        tables.owned_list(owner, list_id)?;
        Ok(tables
            .items
            .iter()
            .rev()
            .filter(|i| i.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn insert_items(
        &self,
        owner: Uuid,
        list_id: Uuid,
        items: Vec<NewListItem>,
    ) -> AppResult<Vec<ListItem>> {
        self.begin()?;
        let mut tables = self.tables.lock().await;
        tables.owned_list(owner, list_id)?;
        let now = Utc::now();
        let inserted: Vec<ListItem> = items
            .into_iter()
            .map(|item| ListItem {
                id: Uuid::new_v4(),
                list_id,
                title: item.title,
                quantity: item.quantity,
                category_id: item.category_id,
                category_name: item.category_name,
                unit_price: item.unit_price,
                is_completed: false,
                created_at: now,
            })
            .collect();
        tables.items.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn update_item(
        &self,
        owner: Uuid,
        list_id: Uuid,
        item_id: Uuid,
        patch: ItemPatch,
    ) -> AppResult<ListItem> {
        self.begin()?;
        let mut tables = self.tables.lock().await;
        tables.owned_list(owner, list_id)?;
        let item = tables
            .items
            .iter_mut()
            .find(|i| i.id == item_id && i.list_id == list_id)
            .ok_or(AppError::NotFound)?;
        if let Some(done) = patch.is_completed {
            item.is_completed = done;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = patch.unit_price {
            item.unit_price = price;
        }
        Ok(item.clone())
    }

    async fn delete_item(&self, owner: Uuid, list_id: Uuid, item_id: Uuid) -> AppResult<()> {
        self.begin()?;
        let mut tables = self.tables.lock().await;
        tables.owned_list(owner, list_id)?;
        let before = tables.items.len();
        tables
            .items
            .retain(|i| !(i.id == item_id && i.list_id == list_id));
        if tables.items.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
