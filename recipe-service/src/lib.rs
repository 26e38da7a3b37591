pub mod config;
pub mod db;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, Request, header},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
};
use service_core::error::AppError;
use service_core::middleware::{
    rate_limit::{IpRateLimiter, create_ip_rate_limiter, ip_rate_limit_middleware},
    security_headers::security_headers_middleware,
    tracing::{request_id_from_headers, request_id_middleware},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Environment, RecipeConfig, SwaggerMode};
use crate::services::{
    ActivityService, AiService, AuthService, ImageSearch, JwtService, RecipeService, RecipeStore,
    TextProvider,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::user::me,
        handlers::user::update,
        handlers::history::log_voice_query,
        handlers::history::voice_history,
        handlers::history::log_search,
        handlers::history::search_history,
        handlers::recipes::create_recipe,
        handlers::recipes::list_recipes,
        handlers::recipes::get_recipe,
        handlers::recipes::recommendations,
        handlers::recipes::record_interaction,
        handlers::ai::ai_dishes,
        handlers::ai::ai_ingredients,
        handlers::ai::ai_suggest,
        handlers::ai::ai_conversation,
        handlers::favorites::list_favorites,
        handlers::favorites::add_favorite,
        handlers::favorites::remove_favorite,
        handlers::grocery::list_items,
        handlers::grocery::add_item,
        handlers::grocery::update_item,
        handlers::grocery::delete_item,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::MessageResponse,
            dtos::auth::RegisterRequest,
            dtos::auth::LoginRequest,
            dtos::auth::TokenResponse,
            dtos::user::UpdateUserRequest,
            dtos::user::QueryLogRequest,
            dtos::recipe::CreateRecipeRequest,
            dtos::recipe::InteractionRequest,
            dtos::activity::FavoriteRequest,
            dtos::activity::CreateGroceryItemRequest,
            dtos::activity::UpdateGroceryItemRequest,
            dtos::ai::SuggestRequest,
            dtos::ai::SuggestResponse,
            dtos::ai::ConversationRequest,
            models::UserResponse,
            models::Recipe,
            models::UserRecipeInteraction,
            models::Favorite,
            models::GroceryItem,
            models::VoiceQuery,
            services::ai::DishList,
            services::ai::DishLookup,
            services::ai::Conversation,
            services::ai::ConversationKind,
            services::ai::parser::DishSuggestion,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and bearer tokens"),
        (name = "User", description = "Profile of the signed-in user"),
        (name = "History", description = "Voice and search query log"),
        (name = "Recipes", description = "Stored recipes and recommendations"),
        (name = "AI", description = "Model-backed dish lookup and chat"),
        (name = "Favorites", description = "Saved recipes"),
        (name = "Grocery", description = "Grocery checklist"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Prefix the `#[utoipa::path]` annotations are written against.
const DOCUMENTED_PREFIX: &str = "/api/v1";

/// OpenAPI document with every prefixed path moved under `api_prefix`.
pub fn api_doc(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
            Some(rest) => (format!("{}{}", api_prefix, rest), item),
            None => (path, item),
        })
        .collect();
    doc
}

#[derive(Clone)]
pub struct AppState {
    pub config: RecipeConfig,
    pub store: Arc<dyn RecipeStore>,
    pub jwt: JwtService,
    pub auth_service: AuthService,
    pub recipe_service: RecipeService,
    pub ai_service: AiService,
    pub activity_service: ActivityService,
    pub login_rate_limiter: IpRateLimiter,
    pub register_rate_limiter: IpRateLimiter,
}

impl AppState {
    /// Wire every service to the given store and upstream clients.
    pub fn new(
        config: RecipeConfig,
        store: Arc<dyn RecipeStore>,
        provider: Arc<dyn TextProvider>,
        images: Arc<dyn ImageSearch>,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt);
        let login_rate_limiter = create_ip_rate_limiter(
            config.rate_limit.login_attempts,
            config.rate_limit.login_window_seconds,
        );
        let register_rate_limiter = create_ip_rate_limiter(
            config.rate_limit.register_attempts,
            config.rate_limit.register_window_seconds,
        );

        Self {
            auth_service: AuthService::new(store.clone(), jwt.clone()),
            recipe_service: RecipeService::new(store.clone(), images.clone()),
            ai_service: AiService::new(store.clone(), provider, images),
            activity_service: ActivityService::new(store.clone()),
            config,
            store,
            jwt,
            login_rate_limiter,
            register_rate_limiter,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let login_route = Router::new()
        .route("/login", post(handlers::auth::login))
        .layer(from_fn_with_state(
            state.login_rate_limiter.clone(),
            ip_rate_limit_middleware,
        ));

    let register_route = Router::new()
        .route("/register", post(handlers::auth::register))
        .layer(from_fn_with_state(
            state.register_rate_limiter.clone(),
            ip_rate_limit_middleware,
        ));

    let public_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/recipes", get(handlers::recipes::list_recipes))
        .route(
            "/recipes/recommendations",
            get(handlers::recipes::recommendations),
        )
        .route("/recipes/ai_dishes", get(handlers::ai::ai_dishes))
        .route("/recipes/ai_ingredients", get(handlers::ai::ai_ingredients))
        .route("/recipes/ai_suggest", post(handlers::ai::ai_suggest))
        .route(
            "/recipes/ai_conversation",
            post(handlers::ai::ai_conversation),
        )
        .route("/recipes/:id", get(handlers::recipes::get_recipe))
        .merge(login_route)
        .merge(register_route);

    let protected_routes = Router::new()
        .route("/me", get(handlers::user::me))
        .route("/update", patch(handlers::user::update))
        .route("/voice-query", post(handlers::history::log_voice_query))
        .route("/voice-history", get(handlers::history::voice_history))
        .route(
            "/search-history",
            get(handlers::history::search_history).post(handlers::history::log_search),
        )
        .route("/recipes", post(handlers::recipes::create_recipe))
        .route(
            "/recipes/:id/interactions",
            post(handlers::recipes::record_interaction),
        )
        .route(
            "/favorites",
            get(handlers::favorites::list_favorites).post(handlers::favorites::add_favorite),
        )
        .route(
            "/favorites/:recipe_id",
            delete(handlers::favorites::remove_favorite),
        )
        .route(
            "/grocery",
            get(handlers::grocery::list_items).post(handlers::grocery::add_item),
        )
        .route(
            "/grocery/:id",
            patch(handlers::grocery::update_item).delete(handlers::grocery::delete_item),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let api = public_routes.merge(protected_routes);

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .nest(&state.config.api_prefix, api);

    let swagger_enabled = state.config.environment == Environment::Dev
        || state.config.swagger.enabled == SwaggerMode::Public;
    if swagger_enabled {
        app = app.merge(
            SwaggerUi::new("/docs")
                .url("/.well-known/openapi.json", api_doc(&state.config.api_prefix)),
        );
    }

    app.with_state(state.clone())
        .layer(from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            let request_id = request_id_from_headers(request.headers());

            tracing::info_span!(
                "http_request",
                request_id = %request_id,
                method = %request.method(),
                uri = %request.uri(),
                user_id = tracing::field::Empty,
            )
        }))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&state.config.security.allowed_origins))
}

/// `*` is only accepted outside production (see `RecipeConfig::validate`).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_origins(allowed_origins))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

fn parse_origins(allowed_origins: &[String]) -> Vec<HeaderValue> {
    allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// Service health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Database unreachable", body = dtos::ErrorResponse)
    ),
    tag = "Observability"
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Store health check failed");
        AppError::ServiceUnavailable("Database unavailable".to_string())
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "database": "up"
        }
    })))
}
