//! Ask use case implementation.
//!
//! `AskUseCase` sequences one query end to end: load or create the profile,
//! build the personalization prefix, search, extract the top hits, assemble
//! the prompt, generate the answer, and persist the updated interaction
//! history. Each outbound call gets exactly one attempt; any failure is
//! terminal for the invocation.

use std::sync::Arc;

use sage_core::config::{ASSISTANT_INSTRUCTIONS, EXTRACT_LIMIT};
use sage_core::error::Result;
use sage_core::profile::{ProfileRepository, build_instruction};
use sage_core::search::{ExtractedPage, GenerationService, SearchHit, SearchResponse, SearchService};

/// Upper bound on the extracted-page excerpt included in the prompt, in
/// characters. Keeps the request inside the model's context comfortably.
const PAGE_EXCERPT_CHARS: usize = 4000;

/// Result of one completed query.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    /// The generated answer text
    pub answer: String,
    /// The search hits the answer was grounded on
    pub sources: Vec<SearchHit>,
    /// Name from the profile the answer was personalized for, if any
    pub personalized_for: Option<String>,
}

/// Use case orchestrating profile, search, and generation for one query.
pub struct AskUseCase {
    profile_repository: Arc<dyn ProfileRepository>,
    search_service: Arc<dyn SearchService>,
    generation_service: Arc<dyn GenerationService>,
}

impl AskUseCase {
    /// Creates a new `AskUseCase` instance.
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        search_service: Arc<dyn SearchService>,
        generation_service: Arc<dyn GenerationService>,
    ) -> Self {
        Self {
            profile_repository,
            search_service,
            generation_service,
        }
    }

    /// Runs one query, optionally personalized for `user_id`.
    ///
    /// With a user id, the profile is loaded (created on first sight) and
    /// its personalization prefix is appended to the system instruction;
    /// after a successful answer the profile's interaction history is
    /// persisted. Without a user id the query runs unpersonalized and
    /// nothing is written.
    pub async fn ask(
        &self,
        query: &str,
        user_id: Option<&str>,
        max_results: usize,
    ) -> Result<AskOutcome> {
        let profile = match user_id {
            Some(id) => Some(self.profile_repository.get_or_create(id).await?),
            None => None,
        };

        let instruction_prefix = profile
            .as_ref()
            .map(build_instruction)
            .filter(|prefix| !prefix.is_empty());
        let system_instruction = match &instruction_prefix {
            Some(prefix) => format!("{ASSISTANT_INSTRUCTIONS}\n\n{prefix}"),
            None => ASSISTANT_INSTRUCTIONS.to_string(),
        };

        tracing::debug!(query, personalized = instruction_prefix.is_some(), "searching");
        let search = self.search_service.search(query, max_results).await?;

        let urls: Vec<String> = search
            .hits
            .iter()
            .take(EXTRACT_LIMIT)
            .map(|hit| hit.url.clone())
            .collect();
        let pages = self.search_service.extract(&urls).await?;
        tracing::debug!(
            hits = search.hits.len(),
            extracted = pages.len(),
            "assembling prompt"
        );

        let prompt = build_prompt(query, &search, &pages);
        let answer = self
            .generation_service
            .generate(Some(&system_instruction), &prompt)
            .await?;

        let personalized_for = match profile {
            Some(mut profile) => {
                profile.record_interaction();
                self.profile_repository.save(&profile).await?;
                Some(profile.name)
            }
            None => None,
        };

        Ok(AskOutcome {
            answer,
            sources: search.hits,
            personalized_for,
        })
    }
}

/// Assembles the user prompt: provider summary, ranked hits, extracted page
/// excerpts, then the question. Deterministic for a given input.
fn build_prompt(query: &str, search: &SearchResponse, pages: &[ExtractedPage]) -> String {
    let mut sections = Vec::new();

    if let Some(answer) = &search.answer {
        sections.push(format!("Search engine summary:\n{answer}"));
    }

    if !search.hits.is_empty() {
        let hits = search
            .hits
            .iter()
            .enumerate()
            .map(|(i, hit)| format!("{}. {}\n   {}\n   {}", i + 1, hit.title, hit.url, hit.snippet))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("Search results:\n{hits}"));
    }

    for page in pages {
        sections.push(format!(
            "Content from {}:\n{}",
            page.url,
            excerpt(&page.content, PAGE_EXCERPT_CHARS)
        ));
    }

    sections.push(format!("Question: {query}"));
    sections.join("\n\n")
}

/// Truncates to at most `limit` characters on a char boundary.
fn excerpt(content: &str, limit: usize) -> &str {
    match content.char_indices().nth(limit) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
