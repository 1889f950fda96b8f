use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::ListStore;
use crate::{
    db::{DbPool, OrmConn},
    entity::{
        shopping_list_items::{Column as ItemCol, Entity as ShoppingListItems, Model as ItemModel},
        shopping_lists::{
            ActiveModel as ListActive, Column as ListCol, Entity as ShoppingLists,
            Model as ListModel,
        },
    },
    error::{AppError, AppResult},
    models::{ItemPatch, ListItem, ListPatch, ListWithItemCount, NewList, NewListItem, ShoppingList},
};

/// List store backed by the `shopping_lists` and `shopping_list_items` tables.
#[derive(Clone)]
pub struct PgListStore {
    pool: DbPool,
    orm: OrmConn,
}

impl PgListStore {
    pub fn new(pool: DbPool, orm: OrmConn) -> Self {
        Self { pool, orm }
    }

    fn owned(owner: Uuid, list_id: Uuid) -> Condition {
        Condition::all()
            .add(ListCol::Id.eq(list_id))
            .add(ListCol::UserId.eq(owner))
    }
}

#[async_trait]
impl ListStore for PgListStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn create_list(&self, owner: Uuid, list: NewList) -> AppResult<ShoppingList> {
        let model = ListActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner),
            title: Set(list.title),
            description: Set(list.description),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await?;
        tracing::debug!(list_id = %model.id, "list created");
        Ok(list_from_entity(model))
    }

    async fn get_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<ShoppingList> {
        ShoppingLists::find()
            .filter(Self::owned(owner, list_id))
            .one(&self.orm)
            .await?
            .map(list_from_entity)
            .ok_or(AppError::NotFound)
    }

    async fn update_list(
        &self,
        owner: Uuid,
        list_id: Uuid,
        patch: ListPatch,
    ) -> AppResult<ShoppingList> {
        let updated = sqlx::query_as::<_, ShoppingList>(
            r#"
            UPDATE shopping_lists
            SET title = COALESCE($3, title),
                description = CASE WHEN $4::text IS NULL THEN description ELSE NULLIF($4, '') END
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, created_at
            "#,
        )
        .bind(list_id)
        .bind(owner)
        .bind(patch.title)
        .bind(patch.description)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(AppError::NotFound)
    }

    async fn delete_list(&self, owner: Uuid, list_id: Uuid) -> AppResult<()> {
        let result = ShoppingLists::delete_many()
            .filter(Self::owned(owner, list_id))
            .exec(&self.orm)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        tracing::debug!(list_id = %list_id, "list deleted");
        Ok(())
    }

    async fn lists_with_item_count(&self, owner: Uuid) -> AppResult<Vec<ListWithItemCount>> {
        let rows = sqlx::query_as::<_, ListWithItemCount>(
            r#"
            SELECT l.id, l.user_id, l.title, l.description, l.created_at,
                   COUNT(i.id) AS item_count
            FROM shopping_lists l
            LEFT JOIN shopping_list_items i ON i.shopping_list_id = l.id
            WHERE l.user_id = $1
            GROUP BY l.id
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_items(&self, owner: Uuid, list_id: Uuid) -> AppResult<Vec<ListItem>> {
        self.get_list(owner, list_id).await?;

        let items = ShoppingListItems::find()
            .filter(ItemCol::ShoppingListId.eq(list_id))
            .order_by_desc(ItemCol::CreatedAt)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(item_from_entity)
            .collect();

        Ok(items)
    }

    async fn insert_items(
        &self,
        owner: Uuid,
        list_id: Uuid,
        items: Vec<NewListItem>,
    ) -> AppResult<Vec<ListItem>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::with_capacity(items.len());
        let mut titles = Vec::with_capacity(items.len());
        let mut quantities = Vec::with_capacity(items.len());
        let mut category_ids = Vec::with_capacity(items.len());
        let mut category_names = Vec::with_capacity(items.len());
        let mut prices = Vec::with_capacity(items.len());
        for item in items {
            ids.push(Uuid::new_v4());
            titles.push(item.title);
            quantities.push(item.quantity);
            category_ids.push(item.category_id);
            category_names.push(item.category_name);
            prices.push(item.unit_price);
        }

        // One statement, so the batch lands whole or not at all.
        let inserted = sqlx::query_as::<_, ListItem>(
            r#"
            INSERT INTO shopping_list_items
                (id, shopping_list_id, title, quantity, category_id, category_name, unit_price)
            SELECT u.id, l.id, u.title, u.quantity, u.category_id, u.category_name, u.unit_price
            FROM shopping_lists l
            CROSS JOIN UNNEST($3::uuid[], $4::text[], $5::int4[], $6::text[], $7::text[], $8::numeric[])
                AS u(id, title, quantity, category_id, category_name, unit_price)
            WHERE l.id = $1 AND l.user_id = $2
            RETURNING *
            "#,
        )
        .bind(list_id)
        .bind(owner)
        .bind(ids)
        .bind(titles)
        .bind(quantities)
        .bind(category_ids)
        .bind(category_names)
        .bind(prices)
        .fetch_all(&self.pool)
        .await?;

        if inserted.is_empty() {
            return Err(AppError::NotFound);
        }
        tracing::debug!(list_id = %list_id, count = inserted.len(), "items inserted");
        Ok(inserted)
    }

    async fn update_item(
        &self,
        owner: Uuid,
        list_id: Uuid,
        item_id: Uuid,
        patch: ItemPatch,
    ) -> AppResult<ListItem> {
        let updated = sqlx::query_as::<_, ListItem>(
            r#"
            UPDATE shopping_list_items i
            SET is_completed = COALESCE($4, i.is_completed),
                quantity = COALESCE($5, i.quantity),
                unit_price = COALESCE($6, i.unit_price)
            FROM shopping_lists l
            WHERE i.id = $3
              AND i.shopping_list_id = $2
              AND l.id = i.shopping_list_id
              AND l.user_id = $1
            RETURNING i.*
            "#,
        )
        .bind(owner)
        .bind(list_id)
        .bind(item_id)
        .bind(patch.is_completed)
        .bind(patch.quantity)
        .bind(patch.unit_price)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(AppError::NotFound)
    }

    async fn delete_item(&self, owner: Uuid, list_id: Uuid, item_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM shopping_list_items i
            USING shopping_lists l
            WHERE i.id = $3
              AND i.shopping_list_id = $2
              AND l.id = i.shopping_list_id
              AND l.user_id = $1
            "#,
        )
        .bind(owner)
        .bind(list_id)
        .bind(item_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

pub(crate) fn list_from_entity(model: ListModel) -> ShoppingList {
    ShoppingList {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        description: model.description,
        created_at: model.created_at.into(),
    }
}

pub(crate) fn item_from_entity(model: ItemModel) -> ListItem {
    ListItem {
        id: model.id,
        list_id: model.shopping_list_id,
        title: model.title,
        quantity: model.quantity,
        category_id: model.category_id,
        category_name: model.category_name,
        unit_price: model.unit_price,
        is_completed: model.is_completed,
        created_at: model.created_at.into(),
    }
}
