//! Model-backed endpoints. Upstream failures surface as 503.

use axum::{
    Json,
    extract::{Query, State},
};
use service_core::error::AppError;

use crate::{
    AppState,
    dtos::ai::{
        ConversationRequest, DishDetailsQuery, DishListQuery, SuggestRequest, SuggestResponse,
    },
    services::ai::{Conversation, DishList, DishLookup},
    utils::ValidatedJson,
};

/// Dish names for a category
#[utoipa::path(
    get,
    path = "/api/v1/recipes/ai_dishes",
    params(DishListQuery),
    responses(
        (status = 200, description = "Up to 20 dish names", body = DishList),
        (status = 503, description = "AI service unavailable", body = crate::dtos::ErrorResponse)
    ),
    tag = "AI"
)]
pub async fn ai_dishes(
    State(state): State<AppState>,
    Query(params): Query<DishListQuery>,
) -> Result<Json<DishList>, AppError> {
    Ok(Json(state.ai_service.dishes(&params.category).await?))
}

/// Ingredients, steps and a reference link for a dish
#[utoipa::path(
    get,
    path = "/api/v1/recipes/ai_ingredients",
    params(DishDetailsQuery),
    responses(
        (status = 200, description = "Dish details, cached after the first lookup", body = DishLookup),
        (status = 503, description = "AI service unavailable", body = crate::dtos::ErrorResponse)
    ),
    tag = "AI"
)]
pub async fn ai_ingredients(
    State(state): State<AppState>,
    Query(params): Query<DishDetailsQuery>,
) -> Result<Json<DishLookup>, AppError> {
    let mut lookup = state.ai_service.dish_details(&params.dish).await?;
    // Raw model output is only exposed by the conversation endpoint.
    lookup.raw_response = None;
    Ok(Json(lookup))
}

/// Free-form prompt, raw model answer
#[utoipa::path(
    post,
    path = "/api/v1/recipes/ai_suggest",
    request_body = SuggestRequest,
    responses(
        (status = 200, description = "Model answer", body = SuggestResponse),
        (status = 503, description = "AI service unavailable", body = crate::dtos::ErrorResponse)
    ),
    tag = "AI"
)]
pub async fn ai_suggest(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let suggestion = state.ai_service.suggest(&req.prompt).await?;
    Ok(Json(SuggestResponse { suggestion }))
}

/// Chat-style cooking help
#[utoipa::path(
    post,
    path = "/api/v1/recipes/ai_conversation",
    request_body = ConversationRequest,
    responses(
        (status = 200, description = "A single recipe or a list of suggestions", body = Conversation),
        (status = 503, description = "AI service unavailable", body = crate::dtos::ErrorResponse)
    ),
    tag = "AI"
)]
pub async fn ai_conversation(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ConversationRequest>,
) -> Result<Json<Conversation>, AppError> {
    Ok(Json(state.ai_service.conversation(&req.user_input).await?))
}
