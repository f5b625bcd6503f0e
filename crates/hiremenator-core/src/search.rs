// ABOUTME: SearchResult, the record returned by the web search leaf tool.
// ABOUTME: Also renders result lists as citation-style text for the model.

use serde::{Deserialize, Serialize};

use crate::schema::NOT_AVAILABLE;

/// One ranked hit from the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// Publication date as reported by the source page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            published_date: None,
        }
    }

    pub fn published(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }
}

/// Format results as a numbered list with source, date and URL metadata.
pub fn render_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No results for \"{query}\".");
    }

    let mut out = format!("Results for \"{query}\":\n");
    for (i, r) in results.iter().enumerate() {
        let date = r.published_date.as_deref().unwrap_or(NOT_AVAILABLE);
        out.push_str(&format!(
            "{}. {}\n   {}\n   Source: {} | Date: {}\n",
            i + 1,
            r.title,
            r.snippet,
            r.url,
            date
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_marks_missing_dates() {
        let results = vec![
            SearchResult::new("Resume tips", "https://example.com/a", "Use action verbs").published("2025-01-02"),
            SearchResult::new("CV guide", "https://example.com/b", "Keep it short"),
        ];
        let text = render_results("resume phrasing", &results);
        assert!(text.contains("1. Resume tips"));
        assert!(text.contains("Date: 2025-01-02"));
        assert!(text.contains("2. CV guide"));
        assert!(text.contains("Date: Not Available"));
    }

    #[test]
    fn render_empty_list() {
        assert_eq!(render_results("x", &[]), "No results for \"x\".");
    }
}
