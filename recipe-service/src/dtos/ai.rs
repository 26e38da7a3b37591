use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DishListQuery {
    /// Cuisine or category, e.g. `Thai` or `breakfast`.
    pub category: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DishDetailsQuery {
    pub dish: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SuggestRequest {
    #[validate(length(min = 1, max = 4000, message = "Prompt must be 1-4000 characters"))]
    #[schema(example = "What can I cook with leftover rice?")]
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestResponse {
    pub suggestion: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConversationRequest {
    #[validate(length(min = 1, max = 1000, message = "Input must be 1-1000 characters"))]
    #[schema(example = "How do I cook pad thai?")]
    pub user_input: String,
}
