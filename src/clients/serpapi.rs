//! Google web search through SerpAPI

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::clients::traits::SearchProvider;
use crate::error::{AgrilokaError, Result};
use crate::schemas::Snippet;

const RESULTS_PER_QUERY: &str = "5";

pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgrilokaError::Internal {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Pull `organic_results` out of a SerpAPI response body
pub fn parse_organic_results(body: &Value) -> Result<Vec<Snippet>> {
    let results = body
        .get("organic_results")
        .ok_or_else(|| AgrilokaError::Network {
            message: "No organic results in SERP response".to_string(),
        })?;
    let results = results.as_array().cloned().unwrap_or_default();
    results
        .into_iter()
        .map(|r| serde_json::from_value::<Snippet>(r).map_err(AgrilokaError::from))
        .collect()
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Snippet>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AgrilokaError::Validation {
                message: "Query is required".to_string(),
            });
        }

        debug!(query, "Searching SerpAPI");
        let url = format!("{}/search.json", self.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", RESULTS_PER_QUERY),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let detail = body
                .get("error")
                .and_then(|e| e.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(AgrilokaError::Http {
                status: status.as_u16(),
                message: format!("SERP API error: {}", detail),
            });
        }

        let snippets = parse_organic_results(&body)?;
        debug!(query, results = snippets.len(), "SerpAPI search complete");
        Ok(snippets)
    }
}
