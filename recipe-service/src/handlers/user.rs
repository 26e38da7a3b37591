use axum::{Json, extract::State};
use service_core::error::AppError;

use crate::{
    AppState, dtos::user::UpdateUserRequest, middleware::AuthUser, models::UserResponse,
    utils::ValidatedJson,
};

/// Current user
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    tag = "User",
    security(("bearer_auth" = []))
)]
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.sanitized())
}

/// Partially update the current user
#[utoipa::path(
    patch,
    path = "/api/v1/update",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Email already registered or invalid field", body = crate::dtos::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    tag = "User",
    security(("bearer_auth" = []))
)]
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let updated = state.auth_service.update_profile(&user, req).await?;
    Ok(Json(updated.into()))
}
