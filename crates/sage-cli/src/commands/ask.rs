//! The ask command: one query through search, extraction, and generation.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use sage_application::{AskOutcome, AskUseCase};
use sage_core::config::{Credentials, DEFAULT_QUERY};
use sage_core::error::Result;
use sage_infrastructure::JsonDirProfileRepository;
use sage_interaction::{GeminiApiAgent, TavilySearchAgent};

/// Runs one query and prints the answer with its sources.
pub async fn execute(query: Option<&str>, user_id: Option<&str>, max_results: usize) -> Result<()> {
    let query = query.unwrap_or(DEFAULT_QUERY);
    let outcome = run_query(
        query,
        user_id,
        max_results,
        |var| std::env::var(var).ok(),
        None,
    )
    .await?;
    print_outcome(&outcome);
    Ok(())
}

/// Credential loading, wiring, and the ask use case, parameterized over the
/// environment lookup and profile base directory so tests can run it
/// hermetically.
///
/// Credentials are resolved first: with either key missing this returns
/// before the profile store or the network is touched.
async fn run_query(
    query: &str,
    user_id: Option<&str>,
    max_results: usize,
    lookup: impl Fn(&str) -> Option<String>,
    base_dir: Option<&Path>,
) -> Result<AskOutcome> {
    let credentials = Credentials::from_lookup(lookup)?;

    let repository = Arc::new(JsonDirProfileRepository::new(base_dir)?);
    let search = Arc::new(TavilySearchAgent::new(credentials.tavily_api_key));
    let generation = Arc::new(GeminiApiAgent::new(credentials.gemini_api_key));

    let usecase = AskUseCase::new(repository, search, generation);
    usecase.ask(query, user_id, max_results).await
}

fn print_outcome(outcome: &AskOutcome) {
    println!("{}", "Sage:".bright_green());
    println!("{}", outcome.answer);

    if !outcome.sources.is_empty() {
        println!();
        println!("{}", "Sources:".bright_blue());
        for (i, hit) in outcome.sources.iter().enumerate() {
            println!("  {}. {} - {}", i + 1, hit.title, hit.url);
        }
    }

    if let Some(name) = &outcome.personalized_for {
        println!();
        println!("{}", format!("(personalized for {name})").dimmed());
    }
}

/// Printed after a missing-credential error, mirroring the setup flow.
pub fn print_setup_instructions() {
    eprintln!();
    eprintln!("Setup instructions:");
    eprintln!("  1. Create a .env file in the working directory");
    eprintln!("  2. Add your API keys:");
    eprintln!("       GEMINI_API_KEY=your_gemini_api_key_here");
    eprintln!("       TAVILY_API_KEY=your_tavily_api_key_here");
    eprintln!("  3. Get your API keys from:");
    eprintln!("       Gemini: https://makersuite.google.com/app/apikey");
    eprintln!("       Tavily: https://tavily.com/");
}

#[cfg(test)]
mod tests {
    use super::*;
    use sage_core::error::SageError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_credentials_fail_before_touching_the_profile_store() {
        let temp_dir = TempDir::new().unwrap();

        let err = run_query("quantum computing", Some("u1"), 5, |_| None, Some(temp_dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, SageError::MissingCredential { .. }));
        // No profile directory was created, let alone a profile
        assert!(!temp_dir.path().join("profiles").exists());
    }
}
