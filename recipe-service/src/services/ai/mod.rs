//! AI-assisted dish discovery: prompt building, a single upstream call per
//! request, best-effort parsing and a read-through recipe cache.

pub mod parser;
pub mod prompts;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::error::ServiceError;
use super::image_search::ImageSearch;
use super::metrics;
use super::providers::TextProvider;
use super::store::RecipeStore;
use crate::models::Recipe;
use parser::{DishSuggestion, parse_dish_details, parse_dish_list, parse_dish_suggestions};
use prompts::{PromptIntent, build_prompt};

pub const MAX_DISHES: usize = 20;
const MAX_DISH_NAME_LEN: usize = 100;

static RECIPE_REQUEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:how\s+(?:do|can|should|would)\s+(?:i|you|we)\s+(?:cook|make|prepare)|(?:(?:give|show)\s+me\s+)?(?:an?\s+|the\s+)?recipe\s+for)\s+(?:an?\s+|the\s+|some\s+)?(.+?)[\s?.!]*$",
    )
    .expect("valid regex")
});

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DishList {
    pub category: String,
    pub dishes: Vec<String>,
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DishLookup {
    pub dish: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub reference: Option<String>,
    pub image_url: Option<String>,
    /// True when served from a stored recipe without calling the model.
    pub cached: bool,
    pub partial: bool,
    /// Model output the lookup was parsed from; absent on a cache hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    Recipe,
    Suggestions,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Conversation {
    pub kind: ConversationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<DishLookup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<DishSuggestion>,
    pub partial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Extract `X` from "how do I cook X" / "recipe for X" phrasings.
pub fn requested_dish(user_input: &str) -> Option<String> {
    RECIPE_REQUEST
        .captures(user_input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|dish| !dish.is_empty())
}

#[derive(Clone)]
pub struct AiService {
    store: Arc<dyn RecipeStore>,
    provider: Arc<dyn TextProvider>,
    images: Arc<dyn ImageSearch>,
}

impl AiService {
    pub fn new(
        store: Arc<dyn RecipeStore>,
        provider: Arc<dyn TextProvider>,
        images: Arc<dyn ImageSearch>,
    ) -> Self {
        Self {
            store,
            provider,
            images,
        }
    }

    /// One upstream attempt. Failures are logged here and surface as
    /// [`ServiceError::Upstream`].
    async fn call_llm(&self, prompt: &str) -> Result<String, ServiceError> {
        match self.provider.generate(prompt).await {
            Ok(text) => {
                metrics::record_llm_request("ok");
                Ok(text)
            }
            Err(e) => {
                metrics::record_llm_request(e.outcome());
                tracing::error!(error = %e, "LLM request failed");
                Err(ServiceError::Upstream(e))
            }
        }
    }

    pub async fn dishes(&self, category: &str) -> Result<DishList, ServiceError> {
        let category = required(category, "category")?;

        let text = self
            .call_llm(&build_prompt(PromptIntent::DishList { category }))
            .await?;
        let mut parsed = parse_dish_list(&text);
        parsed.value.truncate(MAX_DISHES);

        tracing::info!(category, count = parsed.value.len(), partial = parsed.partial, "Dish list generated");

        Ok(DishList {
            category: category.to_string(),
            dishes: parsed.value,
            partial: parsed.partial,
        })
    }

    /// Read-through lookup keyed by case-insensitive title.
    ///
    /// Concurrent misses for the same dish each call the model and each
    /// insert a row; titles carry no unique constraint.
    pub async fn dish_details(&self, dish: &str) -> Result<DishLookup, ServiceError> {
        let dish = required(dish, "dish")?;
        if dish.chars().count() > MAX_DISH_NAME_LEN {
            return Err(ServiceError::Validation(format!(
                "dish must be at most {} characters",
                MAX_DISH_NAME_LEN
            )));
        }

        if let Some(recipe) = self.store.find_recipe_by_title(dish).await? {
            if recipe.has_details() {
                metrics::record_cache_lookup("hit");
                tracing::debug!(dish, recipe_id = %recipe.id, "Dish details served from cache");
                return Ok(DishLookup {
                    dish: dish.to_string(),
                    ingredients: recipe.ingredient_lines(),
                    steps: recipe.step_lines(),
                    partial: recipe.reference.is_none(),
                    reference: recipe.reference,
                    image_url: recipe.image_url,
                    cached: true,
                    raw_response: None,
                });
            }
        }
        metrics::record_cache_lookup("miss");

        let text = self
            .call_llm(&build_prompt(PromptIntent::DishDetails { dish }))
            .await?;
        let parsed = parse_dish_details(&text);
        let details = parsed.value;
        let image_url = self.images.find_image(dish).await;

        let mut recipe = Recipe::new(
            dish.to_string(),
            details.ingredients.join("\n"),
            details.steps.join("\n"),
        );
        recipe.reference = details.reference.clone();
        recipe.image_url = image_url.clone();

        match self.store.insert_recipe(&recipe).await {
            Ok(saved) => tracing::info!(dish, recipe_id = %saved.id, partial = parsed.partial, "Cached AI dish details"),
            Err(e) => tracing::warn!(dish, error = %e, "Failed to cache AI dish details"),
        }

        Ok(DishLookup {
            dish: dish.to_string(),
            ingredients: details.ingredients,
            steps: details.steps,
            reference: details.reference,
            image_url,
            cached: false,
            partial: parsed.partial,
            raw_response: Some(text),
        })
    }

    pub async fn suggest(&self, prompt: &str) -> Result<String, ServiceError> {
        if prompt.trim().is_empty() {
            return Err(ServiceError::Validation("prompt must not be empty".into()));
        }
        self.call_llm(&build_prompt(PromptIntent::Suggest { prompt }))
            .await
    }

    /// Single-dish detail for "how do I cook X" style input, otherwise a
    /// list of suggested dishes.
    pub async fn conversation(&self, user_input: &str) -> Result<Conversation, ServiceError> {
        let user_input = required(user_input, "user_input")?;

        if let Some(dish) = requested_dish(user_input) {
            let mut lookup = self.dish_details(&dish).await?;
            let raw_response = lookup.raw_response.take();
            return Ok(Conversation {
                kind: ConversationKind::Recipe,
                partial: lookup.partial,
                recipe: Some(lookup),
                suggestions: Vec::new(),
                raw_response,
            });
        }

        let text = self
            .call_llm(&build_prompt(PromptIntent::Conversation { user_input }))
            .await?;
        let parsed = parse_dish_suggestions(&text);

        Ok(Conversation {
            kind: ConversationKind::Suggestions,
            recipe: None,
            suggestions: parsed.value,
            partial: parsed.partial,
            raw_response: Some(text),
        })
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::image_search::MockImageSearch;
    use crate::services::memory::InMemoryStore;
    use crate::services::providers::{MockTextProvider, ProviderError};

    const CARBONARA: &str = "Ingredients:\n- spaghetti\n- eggs\nSteps:\n1. Boil\n2. Mix\nReference: https://www.bbcgoodfood.com/recipes/carbonara";

    struct Fixture {
        store: Arc<InMemoryStore>,
        provider: Arc<MockTextProvider>,
        images: Arc<MockImageSearch>,
        service: AiService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let provider = Arc::new(MockTextProvider::new());
        let images = Arc::new(MockImageSearch::returning(Some("https://img.example/c.jpg")));
        let service = AiService::new(store.clone(), provider.clone(), images.clone());
        Fixture {
            store,
            provider,
            images,
            service,
        }
    }

    #[test]
    fn recognizes_recipe_requests() {
        assert_eq!(requested_dish("How do I cook pad thai?").as_deref(), Some("pad thai"));
        assert_eq!(requested_dish("how can you make a Pavlova").as_deref(), Some("Pavlova"));
        assert_eq!(requested_dish("Recipe for lasagna.").as_deref(), Some("lasagna"));
        assert_eq!(requested_dish("give me a recipe for the best chili").as_deref(), Some("best chili"));
        assert_eq!(requested_dish("something warm for a rainy day"), None);
        assert_eq!(requested_dish("how do I cook"), None);
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let f = fixture();
        f.provider.push_response(CARBONARA);

        let first = f.service.dish_details("Carbonara").await.unwrap();
        assert!(!first.cached);
        assert_eq!(first.ingredients, vec!["spaghetti", "eggs"]);
        assert_eq!(first.image_url.as_deref(), Some("https://img.example/c.jpg"));

        let second = f.service.dish_details("carbonara").await.unwrap();
        assert!(second.cached);
        assert_eq!(second.ingredients, first.ingredients);
        assert_eq!(second.steps, first.steps);
        assert_eq!(second.reference, first.reference);
        assert!(second.raw_response.is_none());

        assert_eq!(f.provider.call_count(), 1);
        assert_eq!(f.images.call_count(), 1);
        assert_eq!(f.store.recipe_count(), 1);
    }

    #[tokio::test]
    async fn empty_cached_row_triggers_new_lookup() {
        let f = fixture();
        f.provider.push_response("I don't know that dish.");
        f.provider.push_response(CARBONARA);

        let first = f.service.dish_details("Carbonara").await.unwrap();
        assert!(first.partial);
        assert!(first.ingredients.is_empty());

        let second = f.service.dish_details("Carbonara").await.unwrap();
        assert!(!second.cached);
        assert_eq!(f.provider.call_count(), 2);
        assert_eq!(f.store.recipe_count(), 2);

        let third = f.service.dish_details("Carbonara").await.unwrap();
        assert!(third.cached);
        assert_eq!(third.ingredients, vec!["spaghetti", "eggs"]);
        assert_eq!(f.provider.call_count(), 2);
        assert_eq!(f.store.recipe_count(), 2);
    }

    #[tokio::test]
    async fn upstream_failure_is_reported_and_nothing_cached() {
        let f = fixture();
        f.provider.push_error(ProviderError::NetworkError("timeout".into()));

        let err = f.service.dish_details("Carbonara").await.unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(_)));
        assert_eq!(f.store.recipe_count(), 0);
    }

    #[tokio::test]
    async fn dish_list_is_capped() {
        let f = fixture();
        let text: String = (1..=25).map(|i| format!("{}. Dish {}\n", i, i)).collect();
        f.provider.push_response(text);

        let list = f.service.dishes("Italian").await.unwrap();
        assert_eq!(list.dishes.len(), MAX_DISHES);
        assert_eq!(list.dishes[0], "Dish 1");
    }

    #[tokio::test]
    async fn blank_inputs_are_rejected_without_upstream_call() {
        let f = fixture();
        assert!(matches!(f.service.dishes("  ").await, Err(ServiceError::Validation(_))));
        assert!(matches!(f.service.dish_details("").await, Err(ServiceError::Validation(_))));
        assert!(matches!(f.service.suggest("\n").await, Err(ServiceError::Validation(_))));
        assert_eq!(f.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn conversation_routes_recipe_requests_to_details() {
        let f = fixture();
        f.provider.push_response(CARBONARA);

        let reply = f.service.conversation("How do I make carbonara?").await.unwrap();
        assert_eq!(reply.kind, ConversationKind::Recipe);
        assert_eq!(reply.raw_response.as_deref(), Some(CARBONARA));
        let recipe = reply.recipe.unwrap();
        assert_eq!(recipe.dish, "carbonara");
        assert!(recipe.raw_response.is_none());
    }

    #[tokio::test]
    async fn conversation_otherwise_suggests_dishes() {
        let f = fixture();
        f.provider
            .push_response("Dish 1: Soup\nTime: 20 min\nDish 2: Stew\nDifficulty: Easy");

        let reply = f.service.conversation("something warm").await.unwrap();
        assert_eq!(reply.kind, ConversationKind::Suggestions);
        let names: Vec<_> = reply.suggestions.iter().filter_map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["Soup", "Stew"]);
        assert!(!reply.partial);
        assert!(f.provider.prompts()[0].contains("something warm"));
    }
}
