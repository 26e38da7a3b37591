use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::{
    AppState,
    dtos::recipe::{CreateRecipeRequest, InteractionRequest, ListRecipesQuery, RecommendationsQuery},
    middleware::AuthUser,
    models::{Recipe, UserRecipeInteraction},
    utils::ValidatedJson,
};

/// Add a recipe
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, description = "Missing title, ingredients or steps", body = crate::dtos::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Recipes",
    security(("bearer_auth" = []))
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = state.recipe_service.create(user.id, req).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// List recipes
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(ListRecipesQuery),
    responses(
        (status = 200, description = "Page of recipes", body = [Recipe])
    ),
    tag = "Recipes"
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListRecipesQuery>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let recipes = state.recipe_service.list(params.skip, params.limit).await?;
    Ok(Json(recipes))
}

/// Get one recipe
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = Uuid, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = Recipe),
        (status = 404, description = "Recipe not found", body = crate::dtos::ErrorResponse)
    ),
    tag = "Recipes"
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    Ok(Json(state.recipe_service.get(id).await?))
}

/// Recipes matching a user's preference tags
#[utoipa::path(
    get,
    path = "/api/v1/recipes/recommendations",
    params(RecommendationsQuery),
    responses(
        (status = 200, description = "Recipes sharing a tag with the user's preferences", body = [Recipe]),
        (status = 404, description = "User not found", body = crate::dtos::ErrorResponse)
    ),
    tag = "Recipes"
)]
pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let recipes = state
        .recipe_service
        .recommend(params.user_id, params.limit)
        .await?;
    Ok(Json(recipes))
}

/// Record that the caller viewed or liked a recipe
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/interactions",
    params(("id" = Uuid, Path, description = "Recipe id")),
    request_body = InteractionRequest,
    responses(
        (status = 201, description = "Interaction recorded", body = UserRecipeInteraction),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse),
        (status = 404, description = "Recipe not found", body = crate::dtos::ErrorResponse)
    ),
    tag = "Recipes",
    security(("bearer_auth" = []))
)]
pub async fn record_interaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<InteractionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let interaction = state
        .recipe_service
        .record_interaction(user.id, id, req.liked)
        .await?;
    Ok((StatusCode::CREATED, Json(interaction)))
}
