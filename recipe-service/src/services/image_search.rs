//! Advisory image lookup against the Openverse API.
//!
//! Never fails the caller: every error is logged and turned into `None`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::config::ImageSearchConfig;

#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn find_image(&self, query: &str) -> Option<String>;
}

pub struct OpenverseClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
struct ImageResult {
    url: Option<String>,
}

impl OpenverseClient {
    pub fn new(config: &ImageSearchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn search(&self, query: &str, commercial_only: bool) -> Result<Option<String>, reqwest::Error> {
        let mut params = vec![("q", query), ("page_size", "1")];
        if commercial_only {
            params.push(("license_type", "commercial"));
        }

        let mut request = self.client.get(&self.api_url).query(&params);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let body: SearchResponse = request.send().await?.error_for_status()?.json().await?;
        Ok(first_url(body))
    }
}

fn first_url(body: SearchResponse) -> Option<String> {
    body.results
        .into_iter()
        .next()
        .and_then(|r| r.url)
        .filter(|u| !u.is_empty())
}

#[async_trait]
impl ImageSearch for OpenverseClient {
    async fn find_image(&self, query: &str) -> Option<String> {
        match self.search(query, true).await {
            Ok(Some(url)) => return Some(url),
            Ok(None) => tracing::debug!(query, "No commercial-license image found"),
            Err(e) => tracing::warn!(query, error = %e, "Licensed image search failed"),
        }

        match self.search(query, false).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(query, error = %e, "Image search failed");
                None
            }
        }
    }
}

/// Returns a fixed answer and records the queries it was asked.
#[derive(Default)]
pub struct MockImageSearch {
    url: Option<String>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl MockImageSearch {
    pub fn returning(url: Option<&str>) -> Self {
        Self {
            url: url.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ImageSearch for MockImageSearch {
    async fn find_image(&self, query: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        self.url.clone()
    }
}
