//! Per-user list lifecycle: create, update, delete and refresh, over a cached view
//! of the user's lists.
//!
//! The cache only changes after a store call succeeds. Each call records the cache
//! generation when it starts; [`ListController::deactivate`] bumps the generation, so
//! responses that arrive afterwards are dropped instead of overwriting newer state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ListPatch, ListWithItemCount, NewList, ShoppingList},
    store::ListStore,
};

#[derive(Debug, Default)]
struct CacheState {
    lists: Vec<ListWithItemCount>,
    generation: u64,
    active: bool,
    loaded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket(u64);

pub struct ListController {
    store: Arc<dyn ListStore>,
    owner: Uuid,
    state: Mutex<CacheState>,
}

impl ListController {
    pub fn new(store: Arc<dyn ListStore>, owner: Uuid) -> Self {
        Self {
            store,
            owner,
            state: Mutex::new(CacheState {
                active: true,
                ..CacheState::default()
            }),
        }
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    /// Snapshot of the cached lists, newest first.
    pub fn lists(&self) -> Vec<ListWithItemCount> {
        self.state().lists.clone()
    }

    pub fn find(&self, list_id: Uuid) -> Option<ListWithItemCount> {
        self.state()
            .lists
            .iter()
            .find(|entry| entry.list.id == list_id)
            .cloned()
    }

    /// Whether a refresh has completed since construction.
    pub fn is_loaded(&self) -> bool {
        self.state().loaded
    }

    pub fn is_active(&self) -> bool {
        self.state().active
    }

    /// Stop applying responses. Calls already in flight still reach the store.
    pub fn deactivate(&self) {
        let mut state = self.state();
        state.active = false;
        state.generation += 1;
    }

    /// Re-activate and reload, the equivalent of a screen regaining focus.
    pub async fn focus(&self) -> AppResult<()> {
        self.state().active = true;
        self.refresh().await
    }

    /// Re-fetch the user's lists and replace the cache.
    pub async fn refresh(&self) -> AppResult<()> {
        let ticket = self.ticket();
        let lists = self.store.lists_with_item_count(self.owner).await?;
        tracing::debug!(
            owner = %self.owner,
            backend = self.store.backend_tag(),
            count = lists.len(),
            "lists fetched"
        );
        self.apply(ticket, |state| {
            state.lists = lists;
            state.loaded = true;
        });
        Ok(())
    }

    pub async fn create(&self, list: NewList) -> AppResult<ShoppingList> {
        let list = list.validate()?;
        let ticket = self.ticket();
        let created = self.store.create_list(self.owner, list).await?;
        self.apply(ticket, |state| {
            state.lists.insert(
                0,
                ListWithItemCount {
                    list: created.clone(),
                    item_count: 0,
                },
            );
        });
        Ok(created)
    }

    pub async fn update(&self, list_id: Uuid, patch: ListPatch) -> AppResult<ShoppingList> {
        let patch = patch.validate()?;
        let ticket = self.ticket();
        let updated = self.store.update_list(self.owner, list_id, patch).await?;
        self.apply(ticket, |state| {
            if let Some(entry) = state.lists.iter_mut().find(|e| e.list.id == list_id) {
                entry.list = updated.clone();
            }
        });
        Ok(updated)
    }

    pub async fn delete(&self, list_id: Uuid) -> AppResult<()> {
        let ticket = self.ticket();
        self.store.delete_list(self.owner, list_id).await?;
        self.apply(ticket, |state| {
            state.lists.retain(|e| e.list.id != list_id);
        });
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ticket(&self) -> Ticket {
        Ticket(self.state().generation)
    }

    fn apply(&self, ticket: Ticket, update: impl FnOnce(&mut CacheState)) -> bool {
        let mut state = self.state();
        if !state.active || state.generation != ticket.0 {
            tracing::warn!(owner = %self.owner, "discarding stale list response");
            return false;
        }
        update(&mut state);
        true
    }
}
