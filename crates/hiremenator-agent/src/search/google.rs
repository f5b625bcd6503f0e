// ABOUTME: Google Custom Search JSON API adapter implementing SearchProvider.
// ABOUTME: Maps items to SearchResult and reads publication dates from page metadata when present.

use async_trait::async_trait;
use serde_json::Value;

use hiremenator_core::search::SearchResult;

use super::{SearchError, SearchProvider};
use crate::config::ConfigError;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";
const PROVIDER: &str = "google";

/// Metatag names that commonly carry a publication date, in preference order.
const DATE_TAGS: &[&str] = &[
    "article:published_time",
    "og:published_time",
    "datepublished",
    "date",
    "pubdate",
    "article:modified_time",
];

/// Calls the Custom Search API with an API key and search engine id.
pub struct GoogleSearchProvider {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
    base_url: String,
}

impl GoogleSearchProvider {
    /// Create a provider from environment variables.
    /// Required: `GOOGLE_SEARCH_API_KEY`, `GOOGLE_SEARCH_ENGINE_ID`
    /// Optional: `GOOGLE_SEARCH_BASE_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GOOGLE_SEARCH_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing("GOOGLE_SEARCH_API_KEY"))?;
        let engine_id = std::env::var("GOOGLE_SEARCH_ENGINE_ID")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing("GOOGLE_SEARCH_ENGINE_ID"))?;
        let base_url = std::env::var("GOOGLE_SEARCH_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(api_key, engine_id, base_url))
    }

    pub fn new(api_key: String, engine_id: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            engine_id,
            base_url,
        }
    }

    /// Parse a Custom Search response body. A body without `items` means no hits.
    pub fn parse_response(body: &Value) -> Result<Vec<SearchResult>, SearchError> {
        if let Some(message) = body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return Err(provider_error(message));
        }

        let Some(items) = body.get("items") else {
            return Ok(Vec::new());
        };
        let items = items
            .as_array()
            .ok_or_else(|| provider_error("items is not an array"))?;

        Ok(items
            .iter()
            .filter_map(|item| {
                let url = item.get("link").and_then(|l| l.as_str())?;
                let title = item.get("title").and_then(|t| t.as_str()).unwrap_or(url);
                let snippet = item.get("snippet").and_then(|s| s.as_str()).unwrap_or("");
                let mut result = SearchResult::new(title, url, snippet.trim());
                if let Some(date) = published_date(item) {
                    result = result.published(date);
                }
                Some(result)
            })
            .collect())
    }
}

fn published_date(item: &Value) -> Option<String> {
    let tags = item
        .get("pagemap")
        .and_then(|p| p.get("metatags"))
        .and_then(|m| m.as_array())?;

    DATE_TAGS.iter().find_map(|name| {
        tags.iter()
            .filter_map(|t| t.get(*name).and_then(|v| v.as_str()))
            .find(|v| !v.is_empty())
            .map(String::from)
    })
}

fn provider_error(message: impl Into<String>) -> SearchError {
    SearchError::Provider {
        provider: PROVIDER.to_string(),
        message: message.into(),
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await
            .map_err(|e| provider_error(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(provider_error(format!("API error {}: {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| provider_error(format!("failed to parse JSON: {}", e.without_url())))?;

        Self::parse_response(&body)
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
