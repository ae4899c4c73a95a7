//! Service traits for the two outbound APIs.
//!
//! The interaction layer implements these against the hosted providers;
//! orchestrator tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::search::{ExtractedPage, SearchResponse};

/// Service for executing web searches and pulling page content.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Executes a search and returns up to `max_results` ranked hits.
    async fn search(&self, query: &str, max_results: usize) -> Result<SearchResponse>;

    /// Extracts page content for the given URLs.
    ///
    /// URLs the provider fails to fetch are omitted from the result rather
    /// than failing the call.
    async fn extract(&self, urls: &[String]) -> Result<Vec<ExtractedPage>>;
}

/// Service for generating a text answer from an assembled prompt.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generates an answer for `prompt`, optionally steered by a system
    /// instruction.
    async fn generate(&self, system_instruction: Option<&str>, prompt: &str) -> Result<String>;
}
