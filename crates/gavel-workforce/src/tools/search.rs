//! Web search tools.
//!
//! Two search backends are provided: Google programmable search (API key
//! required) and DuckDuckGo's instant answer API (keyless). Both are exposed
//! to agents as tools taking a single `query` string.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{Tool, ToolArguments, ToolHandler, ToolParameters, ToolResult};
use crate::error::Result;

const DEFAULT_MAX_RESULTS: usize = 5;

/// Google programmable search backend.
///
/// Credentials are read from `GOOGLE_API_KEY` and `SEARCH_ENGINE_ID` when not
/// provided explicitly. Missing credentials surface at call time as an error
/// result fed back to the model, not as a construction failure.
#[derive(Debug, Clone)]
pub struct GoogleSearchTool {
    api_key: Option<String>,
    engine_id: Option<String>,
    base_url: String,
    client: Client,
    max_results: usize,
}

impl GoogleSearchTool {
    /// Creates a new Google search backend with credentials from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: env::var("GOOGLE_API_KEY").ok(),
            engine_id: env::var("SEARCH_ENGINE_ID").ok(),
            base_url: "https://www.googleapis.com/customsearch/v1".to_string(),
            client: Client::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Creates a backend with explicit credentials.
    #[must_use]
    pub fn with_credentials(api_key: String, engine_id: String) -> Self {
        Self {
            api_key: Some(api_key),
            engine_id: Some(engine_id),
            base_url: "https://www.googleapis.com/customsearch/v1".to_string(),
            client: Client::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Overrides the base URL (e.g., to point at a local test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Wraps this backend in a `Tool` binding named `search_google`.
    #[must_use]
    pub fn into_tool(self) -> Tool {
        Tool::new(
            "search_google",
            "Search the web with Google and return the top results with titles, links and snippets.",
            ToolParameters::new().add_property("query", "string", "The search query", true),
            Arc::new(self),
        )
    }
}

impl Default for GoogleSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for GoogleSearchTool {
    async fn execute(&self, args: &ToolArguments) -> Result<ToolResult> {
        let query = match args.get_string("query") {
            Some(q) => q,
            None => return Ok(ToolResult::error("Missing required argument 'query'")),
        };

        let (Some(api_key), Some(engine_id)) = (&self.api_key, &self.engine_id) else {
            return Ok(ToolResult::error(
                "Google search is not configured: set GOOGLE_API_KEY and SEARCH_ENGINE_ID",
            ));
        };

        debug!(query = %query, "GoogleSearchTool executing");

        let num = self.max_results.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", api_key.as_str()),
                ("cx", engine_id.as_str()),
                ("q", query.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| crate::WorkforceError::ToolExecutionFailed(format!(
                "Google search request failed: {}",
                e
            )))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = %status, "Google search returned error status");
            return Ok(ToolResult::error(format!("Google search error ({}): {}", status, body)));
        }

        let parsed: GoogleSearchResponse = response.json().await.map_err(|e| {
            crate::WorkforceError::ToolExecutionFailed(format!(
                "Failed to parse Google search response: {}",
                e
            ))
        })?;

        let items = parsed.items.unwrap_or_default();
        if items.is_empty() {
            return Ok(ToolResult::success(format!("No results found for '{query}'")));
        }

        let mut output = format!("Google results for '{query}':\n");
        for (i, item) in items.iter().take(self.max_results).enumerate() {
            let _ = writeln!(
                output,
                "{}. {}\n   {}\n   {}",
                i + 1,
                item.title.as_deref().unwrap_or("(untitled)"),
                item.link.as_deref().unwrap_or(""),
                item.snippet.as_deref().unwrap_or(""),
            );
        }

        Ok(ToolResult::success(output))
    }
}

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    items: Option<Vec<GoogleSearchItem>>,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// DuckDuckGo instant answer backend. No API key required.
#[derive(Debug, Clone)]
pub struct DuckDuckGoTool {
    base_url: String,
    client: Client,
    max_results: usize,
}

impl DuckDuckGoTool {
    /// Creates a new DuckDuckGo search backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: "https://api.duckduckgo.com".to_string(),
            client: Client::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Overrides the base URL (e.g., to point at a local test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Wraps this backend in a `Tool` binding named `search_duckduckgo`.
    #[must_use]
    pub fn into_tool(self) -> Tool {
        Tool::new(
            "search_duckduckgo",
            "Search the web with DuckDuckGo and return an abstract plus related results.",
            ToolParameters::new().add_property("query", "string", "The search query", true),
            Arc::new(self),
        )
    }
}

impl Default for DuckDuckGoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for DuckDuckGoTool {
    async fn execute(&self, args: &ToolArguments) -> Result<ToolResult> {
        let query = match args.get_string("query") {
            Some(q) => q,
            None => return Ok(ToolResult::error("Missing required argument 'query'")),
        };

        debug!(query = %query, "DuckDuckGoTool executing");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query.as_str()), ("format", "json"), ("no_html", "1")])
            .send()
            .await
            .map_err(|e| crate::WorkforceError::ToolExecutionFailed(format!(
                "DuckDuckGo search request failed: {}",
                e
            )))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "DuckDuckGo search returned error status");
            return Ok(ToolResult::error(format!("DuckDuckGo search error ({})", status)));
        }

        // The endpoint labels its payload as JavaScript, so parse from text.
        let body = response.text().await.map_err(|e| {
            crate::WorkforceError::ToolExecutionFailed(format!(
                "Failed to read DuckDuckGo response: {}",
                e
            ))
        })?;
        let parsed: DuckDuckGoResponse = serde_json::from_str(&body)?;

        let mut output = format!("DuckDuckGo results for '{query}':\n");
        let mut count = 0usize;

        if let Some(abstract_text) = parsed.abstract_text.filter(|t| !t.is_empty()) {
            let _ = writeln!(
                output,
                "Abstract: {}\n   {}",
                abstract_text,
                parsed.abstract_url.as_deref().unwrap_or(""),
            );
            count += 1;
        }

        for topic in parsed.related_topics.iter().flat_map(RelatedTopic::flatten) {
            if count >= self.max_results {
                break;
            }
            if let Some(text) = topic.text.as_deref().filter(|t| !t.is_empty()) {
                let _ = writeln!(
                    output,
                    "{}. {}\n   {}",
                    count + 1,
                    text,
                    topic.first_url.as_deref().unwrap_or(""),
                );
                count += 1;
            }
        }

        if count == 0 {
            return Ok(ToolResult::success(format!("No results found for '{query}'")));
        }

        Ok(ToolResult::success(output))
    }
}

#[derive(Debug, Deserialize)]
struct DuckDuckGoResponse {
    #[serde(rename = "AbstractText")]
    abstract_text: Option<String>,
    #[serde(rename = "AbstractURL")]
    abstract_url: Option<String>,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// Related topics are either plain results or named groups of results.
#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
    #[serde(rename = "Topics", default)]
    topics: Vec<RelatedTopic>,
}

impl RelatedTopic {
    fn flatten(&self) -> Vec<&RelatedTopic> {
        if self.topics.is_empty() {
            vec![self]
        } else {
            self.topics.iter().flat_map(Self::flatten).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_google_search_success() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "items": [
                {"title": "Rust agents", "link": "https://example.com/a", "snippet": "Agents in Rust"},
                {"title": "More agents", "link": "https://example.com/b", "snippet": "Even more"}
            ]
        });
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let tool = GoogleSearchTool::with_credentials("key".to_string(), "cx".to_string())
            .with_base_url(server.url());

        let result = tool
            .execute(&ToolArguments::new(json!({"query": "rust agents"})))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("Rust agents"));
        assert!(result.output.contains("https://example.com/a"));
    }

    #[tokio::test]
    async fn test_google_search_without_credentials() {
        let tool = GoogleSearchTool {
            api_key: None,
            engine_id: None,
            base_url: "http://unused.invalid".to_string(),
            client: Client::new(),
            max_results: DEFAULT_MAX_RESULTS,
        };

        let result =
            tool.execute(&ToolArguments::new(json!({"query": "anything"}))).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn test_google_search_missing_query() {
        let tool = GoogleSearchTool::with_credentials("key".to_string(), "cx".to_string());
        let result = tool.execute(&ToolArguments::new(json!({}))).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("query"));
    }

    #[tokio::test]
    async fn test_duckduckgo_search_success() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "AbstractText": "Rust is a systems programming language.",
            "AbstractURL": "https://example.com/rust",
            "RelatedTopics": [
                {"Text": "Rust language", "FirstURL": "https://example.com/lang"},
                {"Topics": [{"Text": "Nested topic", "FirstURL": "https://example.com/nested"}]}
            ]
        });
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let tool = DuckDuckGoTool::new().with_base_url(server.url());
        let result =
            tool.execute(&ToolArguments::new(json!({"query": "rust"}))).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("systems programming"));
        assert!(result.output.contains("Nested topic"));
    }

    #[tokio::test]
    async fn test_duckduckgo_search_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(json!({"AbstractText": "", "RelatedTopics": []}).to_string())
            .create_async()
            .await;

        let tool = DuckDuckGoTool::new().with_base_url(server.url());
        let result =
            tool.execute(&ToolArguments::new(json!({"query": "xyzzy"}))).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("No results found"));
    }

    #[test]
    fn test_into_tool_names() {
        assert_eq!(GoogleSearchTool::default().into_tool().name, "search_google");
        assert_eq!(DuckDuckGoTool::default().into_tool().name, "search_duckduckgo");
    }
}
