//! Search domain models.

use serde::{Deserialize, Serialize};

/// A single ranked hit returned by the search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    /// Short content excerpt for the hit
    pub snippet: String,
    /// Provider relevance score, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Result of a search call. Transient, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query that was executed
    pub query: String,
    /// Optional synthesized answer from the search provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Ranked hits
    pub hits: Vec<SearchHit>,
}

impl SearchResponse {
    /// Creates an empty response for a query.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: None,
            hits: Vec::new(),
        }
    }
}

/// Page content pulled for one URL by the extraction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedPage {
    pub url: String,
    pub content: String,
}
