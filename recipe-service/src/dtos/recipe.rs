use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[schema(example = "Shakshuka")]
    pub title: String,

    #[validate(length(min = 1, message = "Ingredients are required"))]
    #[schema(example = "eggs\ntomatoes\npeppers")]
    pub ingredients: String,

    #[validate(length(min = 1, message = "Steps are required"))]
    #[schema(example = "Simmer the sauce\nCrack in the eggs")]
    pub steps: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(length(max = 20))]
    #[schema(example = "easy")]
    pub difficulty: Option<String>,

    #[validate(range(min = 0, message = "Estimated time cannot be negative"))]
    #[schema(example = 30)]
    pub estimated_time: Option<i32>,

    /// Looked up from the image search API when absent.
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesQuery {
    pub skip: Option<i64>,
    /// Clamped to 1..=100 (default 10).
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecommendationsQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InteractionRequest {
    #[serde(default)]
    pub liked: bool,
}
