use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use service_core::error::AppError;

use crate::{
    AppState,
    dtos::{
        MessageResponse,
        auth::{LoginRequest, RegisterRequest, TokenResponse},
    },
    models::UserResponse,
    utils::ValidatedJson,
};

/// Create an account
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Email already registered", body = crate::dtos::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::dtos::ErrorResponse),
        (status = 429, description = "Too many attempts", body = crate::dtos::ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Incorrect email or password", body = crate::dtos::ErrorResponse),
        (status = 429, description = "Too many attempts", body = crate::dtos::ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(token))
}

/// Tokens are not revoked server-side; clients drop them.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Acknowledged", body = MessageResponse)
    ),
    tag = "Authentication"
)]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Successfully logged out. Please delete your token on the client side.",
    ))
}
