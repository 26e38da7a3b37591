//! User-facing recipe catalogue: create, read, list, recommend, favorites
//! and interactions.

use std::sync::Arc;
use uuid::Uuid;

use super::error::ServiceError;
use super::image_search::ImageSearch;
use super::store::RecipeStore;
use crate::dtos::recipe::CreateRecipeRequest;
use crate::models::{Favorite, Recipe, UserRecipeInteraction};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
    images: Arc<dyn ImageSearch>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>, images: Arc<dyn ImageSearch>) -> Self {
        Self { store, images }
    }

    /// Store a user recipe, filling in an image when none was given.
    pub async fn create(
        &self,
        user_id: Uuid,
        req: CreateRecipeRequest,
    ) -> Result<Recipe, ServiceError> {
        let title = req.title.trim();
        if title.is_empty() || req.ingredients.trim().is_empty() || req.steps.trim().is_empty() {
            return Err(ServiceError::Validation(
                "title, ingredients and steps are required".into(),
            ));
        }

        let mut recipe = Recipe::new(title.to_string(), req.ingredients, req.steps);
        recipe.tags = req.tags;
        recipe.difficulty = req.difficulty;
        recipe.estimated_time = req.estimated_time;
        recipe.created_by = Some(user_id);
        recipe.image_url = match req.image_url.filter(|u| !u.trim().is_empty()) {
            Some(url) => Some(url),
            None => self.images.find_image(title).await,
        };

        let recipe = self.store.insert_recipe(&recipe).await?;
        tracing::info!(recipe_id = %recipe.id, user_id = %user_id, "Recipe created");
        Ok(recipe)
    }

    pub async fn get(&self, id: Uuid) -> Result<Recipe, ServiceError> {
        self.store
            .find_recipe_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Recipe"))
    }

    pub async fn list(&self, skip: Option<i64>, limit: Option<i64>) -> Result<Vec<Recipe>, ServiceError> {
        let skip = skip.unwrap_or(0).max(0);
        Ok(self.store.list_recipes(skip, clamp_limit(limit)).await?)
    }

    /// Recipes sharing a tag with the user's preferences. A filter, not a
    /// ranking: results come back in storage order.
    pub async fn recommend(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Recipe>, ServiceError> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or(ServiceError::NotFound("User"))?;

        if user.preferences.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .store
            .recipes_with_any_tag(&user.preferences, clamp_limit(limit))
            .await?)
    }

    pub async fn add_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> Result<Favorite, ServiceError> {
        self.get(recipe_id).await?;
        Ok(self.store.add_favorite(user_id, recipe_id).await?)
    }

    pub async fn list_favorites(&self, user_id: Uuid) -> Result<Vec<Favorite>, ServiceError> {
        Ok(self.store.list_favorites(user_id).await?)
    }

    pub async fn remove_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), ServiceError> {
        if self.store.remove_favorite(user_id, recipe_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("Favorite"))
        }
    }

    pub async fn record_interaction(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        liked: bool,
    ) -> Result<UserRecipeInteraction, ServiceError> {
        self.get(recipe_id).await?;
        Ok(self.store.record_interaction(user_id, recipe_id, liked).await?)
    }
}
