//! Persistence seam used by every service and handler.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::StoreError;
use crate::models::{
    Favorite, GroceryItem, GroceryItemChanges, Recipe, User, UserRecipeInteraction, VoiceQuery,
};

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn health_check(&self) -> StoreResult<()>;

    // ==================== Users ====================

    async fn insert_user(&self, user: &User) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Case-insensitive.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn update_user(&self, user: &User) -> StoreResult<User>;

    // ==================== Recipes ====================

    async fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<Recipe>;

    async fn find_recipe_by_id(&self, id: Uuid) -> StoreResult<Option<Recipe>>;

    /// Ordered by `created_at`, then `id`.
    async fn list_recipes(&self, skip: i64, limit: i64) -> StoreResult<Vec<Recipe>>;

    /// Recipe whose title matches case-insensitively. Titles are not unique;
    /// the oldest row with both ingredients and steps wins, else the oldest.
    async fn find_recipe_by_title(&self, title: &str) -> StoreResult<Option<Recipe>>;

    /// Recipes sharing at least one tag with `tags`, in storage order.
    async fn recipes_with_any_tag(&self, tags: &[String], limit: i64)
    -> StoreResult<Vec<Recipe>>;

    // ==================== Activity ====================

    async fn record_interaction(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        liked: bool,
    ) -> StoreResult<UserRecipeInteraction>;

    /// Idempotent: favoriting twice returns the existing row.
    async fn add_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<Favorite>;

    async fn list_favorites(&self, user_id: Uuid) -> StoreResult<Vec<Favorite>>;

    async fn remove_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<bool>;

    async fn insert_grocery_item(
        &self,
        user_id: Uuid,
        item_name: &str,
        quantity: Option<&str>,
    ) -> StoreResult<GroceryItem>;

    async fn list_grocery_items(&self, user_id: Uuid) -> StoreResult<Vec<GroceryItem>>;

    /// `None` when the item does not exist or belongs to another user.
    async fn update_grocery_item(
        &self,
        user_id: Uuid,
        id: i64,
        changes: &GroceryItemChanges,
    ) -> StoreResult<Option<GroceryItem>>;

    async fn delete_grocery_item(&self, user_id: Uuid, id: i64) -> StoreResult<bool>;

    async fn insert_voice_query(
        &self,
        user_id: Option<Uuid>,
        query_text: &str,
    ) -> StoreResult<VoiceQuery>;

    /// Newest first.
    async fn list_voice_queries(&self, user_id: Uuid, limit: i64)
    -> StoreResult<Vec<VoiceQuery>>;
}
