use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const TITLE_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 200;
pub const QUANTITY_MAX: i32 = 9_999;
/// Largest price a `NUMERIC(12, 2)` column holds.
pub const UNIT_PRICE_MAX: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);
pub const UNIT_PRICE_SCALE: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ShoppingList {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ListWithItemCount {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub list: ShoppingList,
    pub item_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ListItem {
    pub id: Uuid,
    #[sqlx(rename = "shopping_list_id")]
    pub list_id: Uuid,
    pub title: String,
    pub quantity: i32,
    pub category_id: String,
    pub category_name: String,
    #[schema(value_type = String, example = "12.50")]
    pub unit_price: Decimal,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for a new shopping list. Fields are trimmed by [`NewList::validate`].
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewList {
    pub title: String,
    pub description: Option<String>,
}

impl NewList {
    pub fn validate(self) -> AppResult<Self> {
        Ok(Self {
            title: validate_title(&self.title)?,
            description: validate_description(self.description.as_deref())?,
        })
    }
}

/// Partial update of a list. An empty description clears it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ListPatch {
    pub fn validate(self) -> AppResult<Self> {
        if self.title.is_none() && self.description.is_none() {
            return Err(AppError::validation("nothing to update"));
        }
        let title = self.title.as_deref().map(validate_title).transpose()?;
        let description = match self.description.as_deref() {
            Some(raw) => Some(validate_description(Some(raw))?.unwrap_or_default()),
            None => None,
        };
        Ok(Self { title, description })
    }
}

/// A priced product selection about to be inserted into a list.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewListItem {
    pub title: String,
    pub quantity: i32,
    pub category_id: String,
    pub category_name: String,
    #[schema(value_type = String, example = "12.50")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ItemPatch {
    pub is_completed: Option<bool>,
    pub quantity: Option<i32>,
    #[schema(value_type = Option<String>, example = "12.50")]
    pub unit_price: Option<Decimal>,
}

impl ItemPatch {
    pub fn toggle(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Self::default()
        }
    }

    pub fn validate(self) -> AppResult<Self> {
        if self.is_completed.is_none() && self.quantity.is_none() && self.unit_price.is_none() {
            return Err(AppError::validation("nothing to update"));
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = self.unit_price {
            validate_price(price)?;
        }
        Ok(self)
    }
}

pub fn validate_title(raw: &str) -> AppResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::validation("list title must not be blank"));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::validation(format!(
            "list title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(title.to_string())
}

pub fn validate_description(raw: Option<&str>) -> AppResult<Option<String>> {
    let Some(description) = raw.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(AppError::validation(format!(
            "list description must be at most {DESCRIPTION_MAX_CHARS} characters"
        )));
    }
    Ok(Some(description.to_string()))
}

pub fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }
    if quantity > QUANTITY_MAX {
        return Err(AppError::validation(format!(
            "quantity must be at most {QUANTITY_MAX}"
        )));
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> AppResult<()> {
    if price <= Decimal::ZERO {
        return Err(AppError::validation("unit price must be greater than 0"));
    }
    if price > UNIT_PRICE_MAX {
        return Err(AppError::validation(format!(
            "unit price must be at most {UNIT_PRICE_MAX}"
        )));
    }
    if price.normalize().scale() > UNIT_PRICE_SCALE {
        return Err(AppError::validation(
            "unit price must have at most 2 decimal places",
        ));
    }
    Ok(())
}
