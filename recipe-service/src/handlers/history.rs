//! Voice and typed search queries share one log.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use service_core::error::AppError;

use crate::{
    AppState,
    dtos::user::{HistoryQuery, QueryLogRequest},
    middleware::AuthUser,
    models::VoiceQuery,
    utils::ValidatedJson,
};

async fn log(
    state: &AppState,
    user: &AuthUser,
    req: QueryLogRequest,
) -> Result<impl IntoResponse, AppError> {
    let entry = state.activity_service.log_query(user.0.id, &req.query_text).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn history(
    state: &AppState,
    user: &AuthUser,
    params: HistoryQuery,
) -> Result<Json<Vec<VoiceQuery>>, AppError> {
    let entries = state
        .activity_service
        .query_history(user.0.id, params.limit)
        .await?;
    Ok(Json(entries))
}

/// Log a voice query
#[utoipa::path(
    post,
    path = "/api/v1/voice-query",
    request_body = QueryLogRequest,
    responses(
        (status = 201, description = "Query logged", body = VoiceQuery),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    tag = "History",
    security(("bearer_auth" = []))
)]
pub async fn log_voice_query(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<QueryLogRequest>,
) -> Result<impl IntoResponse, AppError> {
    log(&state, &user, req).await
}

/// Voice queries, newest first
#[utoipa::path(
    get,
    path = "/api/v1/voice-history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Logged queries", body = [VoiceQuery]),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    tag = "History",
    security(("bearer_auth" = []))
)]
pub async fn voice_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<VoiceQuery>>, AppError> {
    history(&state, &user, params).await
}

/// Log a typed search
#[utoipa::path(
    post,
    path = "/api/v1/search-history",
    request_body = QueryLogRequest,
    responses(
        (status = 201, description = "Search logged", body = VoiceQuery),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    tag = "History",
    security(("bearer_auth" = []))
)]
pub async fn log_search(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<QueryLogRequest>,
) -> Result<impl IntoResponse, AppError> {
    log(&state, &user, req).await
}

/// Searches, newest first
#[utoipa::path(
    get,
    path = "/api/v1/search-history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Logged searches", body = [VoiceQuery]),
        (status = 401, description = "Missing or invalid token", body = crate::dtos::ErrorResponse)
    ),
    tag = "History",
    security(("bearer_auth" = []))
)]
pub async fn search_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<VoiceQuery>>, AppError> {
    history(&state, &user, params).await
}
