//! Per-user grocery checklist and search/voice query log.

use std::sync::Arc;
use uuid::Uuid;

use super::error::ServiceError;
use super::store::RecipeStore;
use crate::models::{GroceryItem, GroceryItemChanges, VoiceQuery};

pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
pub const MAX_HISTORY_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct ActivityService {
    store: Arc<dyn RecipeStore>,
}

impl ActivityService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub async fn log_query(&self, user_id: Uuid, text: &str) -> Result<VoiceQuery, ServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::Validation("query_text must not be empty".into()));
        }
        Ok(self.store.insert_voice_query(Some(user_id), text).await?)
    }

    pub async fn query_history(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<VoiceQuery>, ServiceError> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);
        Ok(self.store.list_voice_queries(user_id, limit).await?)
    }

    pub async fn add_grocery_item(
        &self,
        user_id: Uuid,
        item_name: &str,
        quantity: Option<&str>,
    ) -> Result<GroceryItem, ServiceError> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err(ServiceError::Validation("item_name must not be empty".into()));
        }
        let quantity = quantity.map(str::trim).filter(|q| !q.is_empty());
        Ok(self
            .store
            .insert_grocery_item(user_id, item_name, quantity)
            .await?)
    }

    pub async fn grocery_list(&self, user_id: Uuid) -> Result<Vec<GroceryItem>, ServiceError> {
        Ok(self.store.list_grocery_items(user_id).await?)
    }

    pub async fn update_grocery_item(
        &self,
        user_id: Uuid,
        id: i64,
        changes: GroceryItemChanges,
    ) -> Result<GroceryItem, ServiceError> {
        self.store
            .update_grocery_item(user_id, id, &changes)
            .await?
            .ok_or(ServiceError::NotFound("Grocery item"))
    }

    pub async fn delete_grocery_item(&self, user_id: Uuid, id: i64) -> Result<(), ServiceError> {
        if self.store.delete_grocery_item(user_id, id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("Grocery item"))
        }
    }
}
