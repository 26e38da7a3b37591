//! Model-backed endpoints over the mock text provider.

mod common;

use axum::http::StatusCode;
use common::{TEST_IMAGE_URL, TestApp};
use recipe_service::services::ProviderError;
use serde_json::json;

const PAELLA: &str = "Ingredients:\n\
- rice\n\
- saffron\n\
- prawns\n\
Steps:\n\
1. Toast the rice\n\
2. Add stock and saffron\n\
Reference: https://www.bbcgoodfood.com/recipes/paella";

#[tokio::test]
async fn ai_dishes_parses_numbered_list() {
    let app = TestApp::spawn();
    app.provider
        .push_response("Here you go:\n1. Pad Thai\n2. Green Curry\n- Som Tam\n");

    let response = app.get("/recipes/ai_dishes?category=thai", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["category"], "thai");
    assert_eq!(
        response.body["dishes"],
        json!(["Pad Thai", "Green Curry", "Som Tam"])
    );
    assert_eq!(response.body["partial"], false);
}

#[tokio::test]
async fn ai_dishes_caps_list_length() {
    let app = TestApp::spawn();
    let many: String = (1..=30).map(|i| format!("{}. Dish {}\n", i, i)).collect();
    app.provider.push_response(many);

    let response = app.get("/recipes/ai_dishes?category=snacks", None).await;

    assert_eq!(response.body["dishes"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn ai_ingredients_caches_first_lookup() {
    let app = TestApp::spawn();
    app.provider.push_response(PAELLA);

    let first = app.get("/recipes/ai_ingredients?dish=Paella", None).await;
    let second = app.get("/recipes/ai_ingredients?dish=paella", None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["cached"], false);
    assert_eq!(
        first.body["ingredients"],
        json!(["rice", "saffron", "prawns"])
    );
    assert_eq!(
        first.body["reference"],
        "https://www.bbcgoodfood.com/recipes/paella"
    );
    assert_eq!(first.body["image_url"], TEST_IMAGE_URL);

    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["cached"], true);
    assert_eq!(second.body["steps"], first.body["steps"]);

    assert_eq!(app.provider.call_count(), 1);
    assert_eq!(app.store.recipe_count(), 1);
}

#[tokio::test]
async fn upstream_failure_returns_503_and_caches_nothing() {
    let app = TestApp::spawn();
    app.provider.push_error(ProviderError::RateLimited);

    let response = app.get("/recipes/ai_ingredients?dish=Paella", None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["details"], "AI service unavailable");
    assert_eq!(app.store.recipe_count(), 0);
}

#[tokio::test]
async fn unconfigured_provider_returns_503() {
    let app = TestApp::spawn();

    let response = app
        .post("/recipes/ai_suggest", None, json!({ "prompt": "dinner ideas" }))
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn ai_suggest_returns_raw_text() {
    let app = TestApp::spawn();
    app.provider.push_response("Try a mushroom risotto.");

    let response = app
        .post("/recipes/ai_suggest", None, json!({ "prompt": "dinner ideas" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["suggestion"], "Try a mushroom risotto.");
}

#[tokio::test]
async fn conversation_recipe_request_uses_dish_lookup() {
    let app = TestApp::spawn();
    app.provider.push_response(PAELLA);

    let response = app
        .post(
            "/recipes/ai_conversation",
            None,
            json!({ "user_input": "How do I cook paella?" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["kind"], "recipe");
    assert_eq!(response.body["recipe"]["dish"], "paella");
    assert_eq!(app.store.recipe_count(), 1);
}

#[tokio::test]
async fn conversation_free_text_returns_suggestions() {
    let app = TestApp::spawn();
    app.provider.push_response(
        "Dish 1: Tomato Soup\n\
         Description: Warming and simple\n\
         Time: 30 minutes\n\
         Dish 2: Grilled Cheese\n\
         Description: Crispy comfort\n",
    );

    let response = app
        .post(
            "/recipes/ai_conversation",
            None,
            json!({ "user_input": "something warm for a rainy day" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["kind"], "suggestions");
    let suggestions = response.body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["name"], "Tomato Soup");
    assert_eq!(suggestions[1]["name"], "Grilled Cheese");
}

#[tokio::test]
async fn blank_category_is_rejected_without_upstream_call() {
    let app = TestApp::spawn();

    let response = app.get("/recipes/ai_dishes?category=%20", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.provider.call_count(), 0);
}
