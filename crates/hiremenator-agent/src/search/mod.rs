// ABOUTME: The web search boundary: SearchProvider trait, SearchError and the validating SearchAdapter.
// ABOUTME: The adapter rejects blank queries and passes provider results through unmodified.

pub mod google;

use std::sync::Arc;

use async_trait::async_trait;

use hiremenator_core::search::SearchResult;

pub use google::GoogleSearchProvider;

/// Errors from the search boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search query is empty")]
    InvalidQuery,

    #[error("search provider {provider} failed: {message}")]
    Provider { provider: String, message: String },
}

/// A web search backend returning ranked results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;

    fn provider_name(&self) -> &str;
}

/// Front door for every search call made by the dispatcher.
#[derive(Clone)]
pub struct SearchAdapter {
    provider: Arc<dyn SearchProvider>,
}

impl SearchAdapter {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Run `query` against the provider.
    ///
    /// Blank queries fail with `InvalidQuery` before the provider is called.
    /// Results come back exactly as the provider ranked them.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }

        let results = self.provider.search(query).await?;
        tracing::debug!(
            provider = self.provider.provider_name(),
            query,
            hits = results.len(),
            "search completed"
        );
        Ok(results)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }
}

impl std::fmt::Debug for SearchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAdapter")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingSearchProvider, StubSearchProvider};

    fn stub_results() -> Vec<SearchResult> {
        vec![
            SearchResult::new("Action verbs for resumes", "https://example.com/verbs", "Led, built, shipped")
                .published("2025-03-01"),
            SearchResult::new("Resume phrasing", "https://example.com/phrasing", "Quantify impact"),
        ]
    }

    #[tokio::test]
    async fn empty_query_is_rejected_without_calling_provider() {
        let provider = Arc::new(StubSearchProvider::new(stub_results()));
        let adapter = SearchAdapter::new(provider.clone());

        assert_eq!(adapter.search("").await, Err(SearchError::InvalidQuery));
        assert_eq!(adapter.search("   \t").await, Err(SearchError::InvalidQuery));
        assert!(provider.queries().is_empty());
    }

    #[tokio::test]
    async fn results_are_returned_unmodified() {
        let provider = Arc::new(StubSearchProvider::new(stub_results()));
        let adapter = SearchAdapter::new(provider.clone());

        let results = adapter.search("resume phrasing examples").await.unwrap();
        assert_eq!(results, stub_results());
        assert_eq!(provider.queries(), vec!["resume phrasing examples".to_string()]);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let adapter = SearchAdapter::new(Arc::new(FailingSearchProvider::new("quota exceeded")));
        match adapter.search("rust jobs").await {
            Err(SearchError::Provider { message, .. }) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected Provider error, got {:?}", other),
        }
    }
}
