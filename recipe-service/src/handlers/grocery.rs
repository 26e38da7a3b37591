use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use service_core::error::AppError;

use crate::{
    AppState,
    dtos::activity::{CreateGroceryItemRequest, UpdateGroceryItemRequest},
    middleware::AuthUser,
    models::GroceryItem,
    utils::ValidatedJson,
};

/// Caller's grocery checklist
#[utoipa::path(
    get,
    path = "/api/v1/grocery",
    responses(
        (status = 200, description = "Grocery items", body = [GroceryItem]),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    tag = "Grocery",
    security(("bearer_auth" = []))
)]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<GroceryItem>>, AppError> {
    Ok(Json(state.activity_service.grocery_list(user.id).await?))
}

/// Add a grocery item
#[utoipa::path(
    post,
    path = "/api/v1/grocery",
    request_body = CreateGroceryItemRequest,
    responses(
        (status = 201, description = "Item added", body = GroceryItem),
        (status = 422, description = "Validation error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Grocery",
    security(("bearer_auth" = []))
)]
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateGroceryItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item = state
        .activity_service
        .add_grocery_item(user.id, &req.item_name, req.quantity.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Rename, re-quantify or tick off an item
#[utoipa::path(
    patch,
    path = "/api/v1/grocery/{id}",
    params(("id" = i64, Path, description = "Grocery item id")),
    request_body = UpdateGroceryItemRequest,
    responses(
        (status = 200, description = "Updated item", body = GroceryItem),
        (status = 404, description = "Item not found", body = crate::dtos::ErrorResponse)
    ),
    tag = "Grocery",
    security(("bearer_auth" = []))
)]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateGroceryItemRequest>,
) -> Result<Json<GroceryItem>, AppError> {
    let item = state
        .activity_service
        .update_grocery_item(user.id, id, req.into())
        .await?;
    Ok(Json(item))
}

/// Delete a grocery item
#[utoipa::path(
    delete,
    path = "/api/v1/grocery/{id}",
    params(("id" = i64, Path, description = "Grocery item id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Item not found", body = crate::dtos::ErrorResponse)
    ),
    tag = "Grocery",
    security(("bearer_auth" = []))
)]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.activity_service.delete_grocery_item(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
