//! Test helpers for recipe-service integration tests.
//!
//! Builds the full router over the in-memory store and mock upstreams so the
//! HTTP surface can be exercised without PostgreSQL or network access.

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use recipe_service::{
    AppState, build_router,
    config::{
        DEFAULT_GEMINI_API_URL, DEFAULT_IMAGE_SEARCH_API_URL, DatabaseConfig, Environment,
        GeminiConfig, ImageSearchConfig, JwtConfig, RateLimitConfig, RecipeConfig,
        SecurityConfig, SwaggerConfig, SwaggerMode,
    },
    services::{InMemoryStore, MockImageSearch, MockTextProvider},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "password123";
pub const TEST_IMAGE_URL: &str = "https://images.example.org/dish.jpg";

pub fn test_config() -> RecipeConfig {
    RecipeConfig {
        common: service_core::config::Config::default(),
        environment: Environment::Dev,
        service_name: "recipe-service-test".into(),
        service_version: "0.0.0".into(),
        log_level: "warn".into(),
        otlp_endpoint: None,
        api_prefix: "/api/v1".into(),
        database: DatabaseConfig {
            url: "postgres://unused".into(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".into(),
            access_token_expiry_minutes: 60,
        },
        gemini: GeminiConfig {
            api_key: String::new(),
            api_url: DEFAULT_GEMINI_API_URL.into(),
            timeout_seconds: 5,
        },
        image_search: ImageSearchConfig {
            api_url: DEFAULT_IMAGE_SEARCH_API_URL.into(),
            api_key: None,
            timeout_seconds: 5,
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".into()],
        },
        swagger: SwaggerConfig {
            enabled: SwaggerMode::Disabled,
        },
        rate_limit: RateLimitConfig {
            login_attempts: 1000,
            login_window_seconds: 60,
            register_attempts: 1000,
            register_window_seconds: 60,
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub provider: Arc<MockTextProvider>,
    pub images: Arc<MockImageSearch>,
}

/// Parsed response: status plus JSON body (`Value::Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: RecipeConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let provider = Arc::new(MockTextProvider::new());
        let images = Arc::new(MockImageSearch::returning(Some(TEST_IMAGE_URL)));

        let state = AppState::new(config, store.clone(), provider.clone(), images.clone());
        let router = build_router(state.clone());

        TestApp {
            router,
            state,
            store,
            provider,
            images,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.state.config.api_prefix, path)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send(request("GET", &self.url(path), token, None)).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(request("POST", &self.url(path), token, Some(body)))
            .await
    }

    pub async fn patch(&self, path: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(request("PATCH", &self.url(path), token, Some(body)))
            .await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send(request("DELETE", &self.url(path), token, None))
            .await
    }

    /// Register a user with the shared test password.
    pub async fn register(&self, email: &str, preferences: &[&str]) -> TestResponse {
        self.post(
            "/register",
            None,
            json!({
                "first_name": "Test",
                "last_name": "Cook",
                "email": email,
                "password": TEST_PASSWORD,
                "preferences": preferences,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post("/login", None, json!({ "email": email, "password": password }))
            .await
    }

    /// Register and log in, returning `(user_id, access_token)`.
    pub async fn signed_in_user(&self, email: &str, preferences: &[&str]) -> (String, String) {
        let registered = self.register(email, preferences).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);
        let user_id = registered.body["id"].as_str().unwrap().to_string();

        let login = self.login(email, TEST_PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
        let token = login.body["access_token"].as_str().unwrap().to_string();

        (user_id, token)
    }

    /// Create a recipe as the given user and return its id.
    pub async fn create_recipe(&self, token: &str, title: &str, tags: &[&str]) -> String {
        let response = self
            .post(
                "/recipes",
                Some(token),
                json!({
                    "title": title,
                    "ingredients": "flour\nwater",
                    "steps": "mix\nbake",
                    "tags": tags,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_str().unwrap().to_string()
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
