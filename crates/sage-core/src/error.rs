//! Error types for the Sage application.

use thiserror::Error;

/// A shared error type for the entire Sage application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every variant is terminal
/// for the current invocation: callers report the message and exit non-zero.
#[derive(Error, Debug, Clone)]
pub enum SageError {
    /// Required API key environment variable is not set
    #[error("Missing credential: {variable} is not set")]
    MissingCredential { variable: &'static str },

    /// Transport-level failure of an outbound HTTP call
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-success response from the search API
    #[error("Search API error{}: {}", fmt_status(.status), .message)]
    SearchApi {
        status: Option<u16>,
        message: String,
    },

    /// Non-success response from the generation API
    #[error("Generation API error{}: {}", fmt_status(.status), .message)]
    GenerationApi {
        status: Option<u16>,
        message: String,
    },

    /// Profile file read/write/enumeration failure
    #[error("Profile store error: {message}")]
    ProfileIo { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error (invalid user id, unknown field, bad value)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SageError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MissingCredential error
    pub fn missing_credential(variable: &'static str) -> Self {
        Self::MissingCredential { variable }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a SearchApi error
    pub fn search_api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::SearchApi {
            status,
            message: message.into(),
        }
    }

    /// Creates a GenerationApi error
    pub fn generation_api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::GenerationApi {
            status,
            message: message.into(),
        }
    }

    /// Creates a ProfileIo error
    pub fn profile_io(message: impl Into<String>) -> Self {
        Self::ProfileIo {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a MissingCredential error
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SageError {
    fn from(err: std::io::Error) -> Self {
        Self::ProfileIo {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SageError>`.
pub type Result<T> = std::result::Result<T, SageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message_names_variable() {
        let err = SageError::missing_credential("GEMINI_API_KEY");
        assert!(err.to_string().contains("GEMINI_API_KEY"));
        assert!(err.is_missing_credential());
    }

    #[test]
    fn test_api_error_includes_status() {
        let err = SageError::search_api(Some(429), "rate limited");
        assert_eq!(err.to_string(), "Search API error (HTTP 429): rate limited");

        let err = SageError::generation_api(None, "connection reset");
        assert_eq!(err.to_string(), "Generation API error: connection reset");
    }

    #[test]
    fn test_serde_json_error_converts_to_serialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: SageError = parse_err.into();
        assert!(err.is_serialization());
    }
}
