//! Gemini `generateContent` client.

use super::{ProviderError, TextProvider};
use crate::config::GeminiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct GeminiTextProvider {
    api_key: String,
    api_url: String,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: &GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            client,
        })
    }

    fn build_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured);
        }

        tracing::debug!(prompt_len = prompt.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        extract_text(api_response)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ProviderError::ContentFiltered);
    }

    candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<String, ProviderError> {
        extract_text(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GeminiTextProvider::build_request("hi")).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn takes_first_part_of_first_candidate() {
        let text = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"1. Pasta"},{"text":"ignored"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(text, "1. Pasta");
    }

    #[test]
    fn empty_candidates_is_an_error() {
        assert!(matches!(parse(r#"{"candidates":[]}"#), Err(ProviderError::EmptyResponse)));
        assert!(matches!(parse(r#"{}"#), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn safety_block_is_content_filtered() {
        let result = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert!(matches!(result, Err(ProviderError::ContentFiltered)));
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let provider = GeminiTextProvider::new(&GeminiConfig {
            api_key: String::new(),
            api_url: "http://127.0.0.1:9/unused".into(),
            timeout_seconds: 1,
        })
        .unwrap();

        assert!(matches!(
            provider.generate("hello").await,
            Err(ProviderError::NotConfigured)
        ));
    }
}
