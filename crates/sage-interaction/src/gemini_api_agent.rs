//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! This agent calls the Gemini `generateContent` REST API directly. The
//! assembled prompt travels as a single user content part; the assistant
//! instructions plus the personalization prefix travel as the system
//! instruction. One attempt per call, no retry.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use sage_core::config::{DEFAULT_MODEL, MODEL_MAX_TOKENS, MODEL_TEMPERATURE};
use sage_core::error::{Result, SageError};
use sage_core::search::GenerationService;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| SageError::network(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            SageError::generation_api(None, format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerationService for GeminiApiAgent {
    async fn generate(&self, system_instruction: Option<&str>, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(SageError::generation_api(
                None,
                "Generation prompt cannot be empty",
            ));
        }

        let contents = vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }];

        let system_instruction = system_instruction.map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        });

        let request = GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig::default(),
        };
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: MODEL_TEMPERATURE,
            max_output_tokens: MODEL_MAX_TOKENS,
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            SageError::generation_api(
                None,
                "Gemini API returned no text in the response candidates",
            )
        })
}

fn map_http_error(status: StatusCode, body: String) -> SageError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    SageError::generation_api(Some(status.as_u16()), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_response_returns_first_text_part() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [{"text": "Quantum computing uses qubits."}]
                    }
                }]
            }"#,
        )
        .unwrap();

        let text = extract_text_response(response).unwrap();
        assert_eq!(text, "Quantum computing uses qubits.");
    }

    #[test]
    fn test_extract_text_response_without_candidates_is_an_error() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        let err = extract_text_response(response).unwrap_err();
        assert!(matches!(err, SageError::GenerationApi { status: None, .. }));
    }

    #[test]
    fn test_map_http_error_parses_provider_error_body() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert_eq!(
            err.to_string(),
            "Generation API error (HTTP 429): RESOURCE_EXHAUSTED: Quota exceeded"
        );
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_request_serializes_generation_config_in_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![],
            system_instruction: None,
            generation_config: GenerationConfig::default(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generation_config"]["maxOutputTokens"], 2000);
        assert!(json.get("system_instruction").is_none());
    }
}
