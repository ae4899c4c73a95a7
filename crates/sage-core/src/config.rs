//! Application configuration: API credentials and tuning constants.
//!
//! Credentials come from environment variables read once at startup.
//! Everything else is a fixed constant; there is no config file.

use crate::error::{Result, SageError};

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the Tavily API key.
pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";
/// Environment variable overriding the profile storage directory.
pub const DATA_DIR_VAR: &str = "SAGE_DATA_DIR";

/// Default Gemini model used for answer generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Sampling temperature for generation requests.
pub const MODEL_TEMPERATURE: f64 = 0.7;
/// Output token budget for generation requests.
pub const MODEL_MAX_TOKENS: u32 = 2000;

/// Default number of search hits requested from the search API.
pub const DEFAULT_SEARCH_RESULTS: usize = 5;
/// Number of top-ranked hits whose pages are extracted before generation.
pub const EXTRACT_LIMIT: usize = 3;

/// Query used when the CLI is invoked without one.
pub const DEFAULT_QUERY: &str = "Research recent developments in AI and machine learning, \
    focusing on practical applications and industry trends. Be comprehensive but concise.";

/// Base system instructions for the assistant. The per-user personalization
/// prefix is appended to this when a profile is in play.
pub const ASSISTANT_INSTRUCTIONS: &str = "\
You are Sage, a search assistant that answers questions using fresh web results.
You are given ranked search results and extracted page content alongside the
user's question.

Guidelines:
- Ground your answer in the provided sources and cite their URLs where helpful.
- Provide comprehensive, well-structured responses.
- Be concise but thorough.
- If the sources do not cover the question, say so rather than guessing.";

/// API keys for the two outbound services.
///
/// Both keys are required; construction fails on the first missing variable
/// so the caller can report a credential error before any network or
/// filesystem access happens.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub tavily_api_key: String,
}

impl Credentials {
    /// Reads both API keys from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads both API keys through the provided lookup function.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = require(&lookup, GEMINI_API_KEY_VAR)?;
        let tavily_api_key = require(&lookup, TAVILY_API_KEY_VAR)?;
        Ok(Self {
            gemini_api_key,
            tavily_api_key,
        })
    }
}

fn require<F>(lookup: &F, variable: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(variable) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SageError::missing_credential(variable)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| map.get(var).map(|v| v.to_string())
    }

    #[test]
    fn test_from_lookup_with_both_keys() {
        let map = HashMap::from([
            (GEMINI_API_KEY_VAR, "gem-key"),
            (TAVILY_API_KEY_VAR, "tvly-key"),
        ]);
        let creds = Credentials::from_lookup(lookup_from(&map)).unwrap();
        assert_eq!(creds.gemini_api_key, "gem-key");
        assert_eq!(creds.tavily_api_key, "tvly-key");
    }

    #[test]
    fn test_from_lookup_missing_gemini_key_is_fatal() {
        let map = HashMap::from([(TAVILY_API_KEY_VAR, "tvly-key")]);
        let err = Credentials::from_lookup(lookup_from(&map)).unwrap_err();
        assert!(matches!(
            err,
            SageError::MissingCredential {
                variable: GEMINI_API_KEY_VAR
            }
        ));
    }

    #[test]
    fn test_from_lookup_missing_tavily_key_is_fatal() {
        let map = HashMap::from([(GEMINI_API_KEY_VAR, "gem-key")]);
        let err = Credentials::from_lookup(lookup_from(&map)).unwrap_err();
        assert!(matches!(
            err,
            SageError::MissingCredential {
                variable: TAVILY_API_KEY_VAR
            }
        ));
    }

    #[test]
    fn test_blank_value_counts_as_unset() {
        let map = HashMap::from([
            (GEMINI_API_KEY_VAR, "   "),
            (TAVILY_API_KEY_VAR, "tvly-key"),
        ]);
        let err = Credentials::from_lookup(lookup_from(&map)).unwrap_err();
        assert!(err.is_missing_credential());
    }
}
