//! In-process [`RecipeStore`] with the same observable semantics as the
//! PostgreSQL store. Used by the unit and router tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::error::StoreError;
use super::store::{RecipeStore, StoreResult};
use crate::models::{
    Favorite, GroceryItem, GroceryItemChanges, Recipe, User, UserRecipeInteraction, VoiceQuery,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    recipes: Vec<Recipe>,
    interactions: Vec<UserRecipeInteraction>,
    favorites: Vec<Favorite>,
    grocery_items: Vec<GroceryItem>,
    voice_queries: Vec<VoiceQuery>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recipe rows, including duplicate titles.
    pub fn recipe_count(&self) -> usize {
        self.tables.lock().map(|t| t.recipes.len()).unwrap_or(0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Database(sqlx::Error::PoolClosed))
    }
}

#[async_trait]
impl RecipeStore for InMemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<User> {
        let mut tables = self.lock()?;
        if tables.email_taken(&user.email, None) {
            return Err(StoreError::UniqueViolation("users_email_lower_key".into()));
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update_user(&self, user: &User) -> StoreResult<User> {
        let mut tables = self.lock()?;
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(StoreError::UniqueViolation("users_email_lower_key".into()));
        }
        let existing = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;
        *existing = user.clone();
        Ok(user.clone())
    }

    async fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<Recipe> {
        self.lock()?.recipes.push(recipe.clone());
        Ok(recipe.clone())
    }

    async fn find_recipe_by_id(&self, id: Uuid) -> StoreResult<Option<Recipe>> {
        Ok(self.lock()?.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recipes(&self, skip: i64, limit: i64) -> StoreResult<Vec<Recipe>> {
        let tables = self.lock()?;
        let mut recipes = tables.recipes.clone();
        recipes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(recipes
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn find_recipe_by_title(&self, title: &str) -> StoreResult<Option<Recipe>> {
        let needle = title.to_lowercase();
        let tables = self.lock()?;
        let mut matches = tables
            .recipes
            .iter()
            .filter(|r| r.title.to_lowercase() == needle);
        let first = matches.clone().next();
        Ok(matches.find(|r| r.has_details()).or(first).cloned())
    }

    async fn recipes_with_any_tag(
        &self,
        tags: &[String],
        limit: i64,
    ) -> StoreResult<Vec<Recipe>> {
        Ok(self
            .lock()?
            .recipes
            .iter()
            .filter(|r| r.has_any_tag(tags))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn record_interaction(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        liked: bool,
    ) -> StoreResult<UserRecipeInteraction> {
        let mut tables = self.lock()?;
        let interaction = UserRecipeInteraction {
            id: tables.next_id(),
            user_id,
            recipe_id,
            liked,
            viewed_at: Utc::now(),
        };
        tables.interactions.push(interaction.clone());
        Ok(interaction)
    }

    async fn add_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<Favorite> {
        let mut tables = self.lock()?;
        if let Some(existing) = tables
            .favorites
            .iter()
            .find(|f| f.user_id == user_id && f.recipe_id == recipe_id)
        {
            return Ok(existing.clone());
        }
        let favorite = Favorite {
            id: tables.next_id(),
            user_id,
            recipe_id,
            added_at: Utc::now(),
        };
        tables.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn list_favorites(&self, user_id: Uuid) -> StoreResult<Vec<Favorite>> {
        Ok(self
            .lock()?
            .favorites
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn remove_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.lock()?;
        let before = tables.favorites.len();
        tables
            .favorites
            .retain(|f| !(f.user_id == user_id && f.recipe_id == recipe_id));
        Ok(tables.favorites.len() != before)
    }

    async fn insert_grocery_item(
        &self,
        user_id: Uuid,
        item_name: &str,
        quantity: Option<&str>,
    ) -> StoreResult<GroceryItem> {
        let mut tables = self.lock()?;
        let item = GroceryItem {
            id: tables.next_id(),
            user_id,
            item_name: item_name.to_string(),
            quantity: quantity.map(str::to_string),
            is_checked: false,
        };
        tables.grocery_items.push(item.clone());
        Ok(item)
    }

    async fn list_grocery_items(&self, user_id: Uuid) -> StoreResult<Vec<GroceryItem>> {
        Ok(self
            .lock()?
            .grocery_items
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_grocery_item(
        &self,
        user_id: Uuid,
        id: i64,
        changes: &GroceryItemChanges,
    ) -> StoreResult<Option<GroceryItem>> {
        let mut tables = self.lock()?;
        Ok(tables
            .grocery_items
            .iter_mut()
            .find(|i| i.id == id && i.user_id == user_id)
            .map(|item| {
                item.apply(changes);
                item.clone()
            }))
    }

    async fn delete_grocery_item(&self, user_id: Uuid, id: i64) -> StoreResult<bool> {
        let mut tables = self.lock()?;
        let before = tables.grocery_items.len();
        tables
            .grocery_items
            .retain(|i| !(i.id == id && i.user_id == user_id));
        Ok(tables.grocery_items.len() != before)
    }

    async fn insert_voice_query(
        &self,
        user_id: Option<Uuid>,
        query_text: &str,
    ) -> StoreResult<VoiceQuery> {
        let mut tables = self.lock()?;
        let query = VoiceQuery {
            id: tables.next_id(),
            user_id,
            query_text: query_text.to_string(),
            created_at: Utc::now(),
        };
        tables.voice_queries.push(query.clone());
        Ok(query)
    }

    async fn list_voice_queries(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<VoiceQuery>> {
        Ok(self
            .lock()?
            .voice_queries
            .iter()
            .rev()
            .filter(|q| q.user_id == Some(user_id))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
