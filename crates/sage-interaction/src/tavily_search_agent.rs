//! TavilySearchAgent - REST client for the Tavily search and extract APIs.
//!
//! `search` returns ranked hits with short content excerpts; `extract` pulls
//! fuller page content for selected URLs. URLs the provider fails to fetch
//! are reported separately by the API and skipped here rather than failing
//! the call. One attempt per call, no retry.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use sage_core::error::{Result, SageError};
use sage_core::search::{ExtractedPage, SearchHit, SearchResponse, SearchService};

const BASE_URL: &str = "https://api.tavily.com";

/// Client for the Tavily HTTP API.
#[derive(Clone)]
pub struct TavilySearchAgent {
    client: Client,
    api_key: String,
}

impl TavilySearchAgent {
    /// Creates a new agent using the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{BASE_URL}/{endpoint}");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                SageError::network(format!("Tavily {endpoint} request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Tavily error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response.json().await.map_err(|err| {
            SageError::search_api(None, format!("Failed to parse Tavily response: {err}"))
        })
    }
}

#[async_trait]
impl SearchService for TavilySearchAgent {
    async fn search(&self, query: &str, max_results: usize) -> Result<SearchResponse> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SageError::search_api(None, "Search query cannot be empty"));
        }

        let request = SearchRequest {
            api_key: &self.api_key,
            query: trimmed,
            max_results,
        };
        let response: SearchApiResponse = self.post_json("search", &request).await?;

        Ok(into_search_response(trimmed, response))
    }

    async fn extract(&self, urls: &[String]) -> Result<Vec<ExtractedPage>> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let request = ExtractRequest {
            api_key: &self.api_key,
            urls,
        };
        let response: ExtractApiResponse = self.post_json("extract", &request).await?;

        for failed in &response.failed_results {
            tracing::warn!(url = %failed.url, "Tavily could not extract page content");
        }

        Ok(response
            .results
            .into_iter()
            .map(|result| ExtractedPage {
                url: result.url,
                content: result.raw_content,
            })
            .collect())
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    api_key: &'a str,
    urls: &'a [String],
}

#[derive(Deserialize)]
struct SearchApiResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchApiResult>,
}

#[derive(Deserialize)]
struct SearchApiResult {
    #[serde(default)]
    title: String,
    url: String,
    /// Tavily calls the snippet field `content`
    #[serde(default)]
    content: String,
    #[serde(default)]
    score: Option<f64>,
}

#[derive(Deserialize)]
struct ExtractApiResponse {
    #[serde(default)]
    results: Vec<ExtractApiResult>,
    #[serde(default)]
    failed_results: Vec<FailedExtractResult>,
}

#[derive(Deserialize)]
struct ExtractApiResult {
    url: String,
    #[serde(default)]
    raw_content: String,
}

#[derive(Deserialize)]
struct FailedExtractResult {
    url: String,
}

fn into_search_response(query: &str, response: SearchApiResponse) -> SearchResponse {
    let hits = response
        .results
        .into_iter()
        .map(|result| SearchHit {
            title: if result.title.is_empty() {
                result.url.clone()
            } else {
                result.title
            },
            url: result.url,
            snippet: result.content,
            score: result.score,
        })
        .collect();

    SearchResponse {
        query: query.to_string(),
        answer: response.answer,
        hits,
    }
}

fn map_http_error(status: StatusCode, body: String) -> SageError {
    // Tavily error bodies vary between {"detail": {"error": ...}},
    // {"detail": ...} and {"error": ...}
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("detail")
                .and_then(|detail| detail.get("error").or(Some(detail)))
                .or_else(|| json.get("error"))
                .and_then(|value| value.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.clone());

    SageError::search_api(Some(status.as_u16()), message)
}
