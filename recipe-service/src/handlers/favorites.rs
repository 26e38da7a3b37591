use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::{AppState, dtos::activity::FavoriteRequest, middleware::AuthUser, models::Favorite};

/// Caller's favorites, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Favorites", body = [Favorite]),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    tag = "Favorites",
    security(("bearer_auth" = []))
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Favorite>>, AppError> {
    Ok(Json(state.recipe_service.list_favorites(user.id).await?))
}

/// Favorite a recipe (idempotent)
#[utoipa::path(
    post,
    path = "/api/v1/favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Favorite stored", body = Favorite),
        (status = 404, description = "Recipe not found", body = crate::dtos::ErrorResponse)
    ),
    tag = "Favorites",
    security(("bearer_auth" = []))
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<FavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let favorite = state
        .recipe_service
        .add_favorite(user.id, req.recipe_id)
        .await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Remove a favorite
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{recipe_id}",
    params(("recipe_id" = Uuid, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Not a favorite", body = crate::dtos::ErrorResponse)
    ),
    tag = "Favorites",
    security(("bearer_auth" = []))
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(recipe_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .recipe_service
        .remove_favorite(user.id, recipe_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
