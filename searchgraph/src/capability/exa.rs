//! Web search via the Exa API.
//!
//! POSTs `{"query", "numResults", "type": "auto"}` with the `x-api-key` header
//! and returns `results[].url` in rank order. The endpoint can be overridden
//! with `EXA_SEARCH_URL` (used by local stubs).

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use super::{CapabilityError, WebSearcher};

const EXA_SEARCH_URL: &str = "https://api.exa.ai/search";
const NUM_RESULTS_MAX: usize = 100;

fn exa_search_url() -> String {
    std::env::var("EXA_SEARCH_URL").unwrap_or_else(|_| EXA_SEARCH_URL.to_string())
}

fn build_body(query: &str, max_results: usize) -> serde_json::Value {
    json!({
        "query": query,
        "numResults": max_results.min(NUM_RESULTS_MAX),
        "type": "auto",
    })
}

/// Extracts result urls in rank order; entries without a url are skipped.
fn parse_urls(value: &serde_json::Value) -> Result<Vec<String>, CapabilityError> {
    let results = value
        .get("results")
        .and_then(|r| r.as_array())
        .ok_or_else(|| CapabilityError::InvalidResponse("Exa response has no results".into()))?;
    Ok(results
        .iter()
        .filter_map(|r| r.get("url").and_then(|u| u.as_str()))
        .map(str::to_string)
        .collect())
}

/// Exa-backed [`WebSearcher`].
pub struct ExaSearcher {
    api_key: String,
    client: reqwest::Client,
}

impl ExaSearcher {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Reads `EXA_API_KEY`; fails with `MissingCredential` when unset or empty.
    pub fn from_env() -> Result<Self, CapabilityError> {
        let key = std::env::var("EXA_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CapabilityError::MissingCredential("EXA_API_KEY".into()))?;
        Ok(Self::new(key))
    }
}

#[async_trait]
impl WebSearcher for ExaSearcher {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<String>, CapabilityError> {
        if self.api_key.trim().is_empty() {
            return Err(CapabilityError::MissingCredential("EXA_API_KEY".into()));
        }
        let body = build_body(query, max_results);
        debug!(query = %query, max_results, "Exa search");
        let res = self
            .client
            .post(exa_search_url())
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            warn!(status, "Exa API error");
            return Err(CapabilityError::Status { status, body });
        }
        let value: serde_json::Value = res
            .json()
            .await
            .map_err(|e| CapabilityError::InvalidResponse(e.to_string()))?;
        let mut urls = parse_urls(&value)?;
        urls.truncate(max_results);
        Ok(urls)
    }
}
