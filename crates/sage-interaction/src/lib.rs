//! Interaction layer for Sage: HTTP clients for the two hosted services.
//!
//! Both clients implement the service traits from `sage-core`, so the
//! application layer never sees provider-specific types.

pub mod gemini_api_agent;
pub mod tavily_search_agent;

pub use gemini_api_agent::GeminiApiAgent;
pub use tavily_search_agent::TavilySearchAgent;
