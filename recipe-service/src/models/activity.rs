//! Per-user activity rows: interactions, favorites, grocery checklist and
//! the voice/search query log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserRecipeInteraction {
    pub id: i64,
    pub user_id: Uuid,
    pub recipe_id: Uuid,
    pub liked: bool,
    pub viewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Favorite {
    pub id: i64,
    pub user_id: Uuid,
    pub recipe_id: Uuid,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GroceryItem {
    pub id: i64,
    pub user_id: Uuid,
    pub item_name: String,
    pub quantity: Option<String>,
    pub is_checked: bool,
}

/// Fields a user may change on a grocery item; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct GroceryItemChanges {
    pub item_name: Option<String>,
    pub quantity: Option<String>,
    pub is_checked: Option<bool>,
}

impl GroceryItem {
    pub fn apply(&mut self, changes: &GroceryItemChanges) {
        if let Some(name) = &changes.item_name {
            self.item_name = name.clone();
        }
        if let Some(quantity) = &changes.quantity {
            self.quantity = Some(quantity.clone());
        }
        if let Some(checked) = changes.is_checked {
            self.is_checked = checked;
        }
    }
}

/// A logged voice or typed search query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VoiceQuery {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub query_text: String,
    pub created_at: DateTime<Utc>,
}
