//! Client for the hosted text generation endpoint.
//!
//! Every call to the model goes through a [`TextGenerator`]. The production
//! implementation is [`GeminiClient`], which talks to the Gemini
//! `generateContent` REST endpoint; tests inject scripted generators through
//! [`crate::CoachBuilder::with_generator`].
//!
//! Calls are a single request/response round-trip. There is no retry; the
//! caller decides how to surface a failure.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

pub mod prompts;

/// Default Gemini REST base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Default overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Header carrying the API key; the key never goes into the request URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Something that turns a prompt into one blob of text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` and returns the generated text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

/// Response body of `generateContent`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiClient {
    /// Creates a client. A missing `api_key` is reported on every call as
    /// [`CoachError::MissingApiKey`] rather than here.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Http` if the HTTP client cannot be constructed.
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Makes the raw call and returns the full response object.
    pub async fn call(&self, prompt: &str) -> Result<GenerateResponse> {
        let api_key = self.api_key.as_deref().ok_or(CoachError::MissingApiKey)?;

        debug!("Calling {} with a {} byte prompt", self.model, prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Text generation returned {status}: {message}");
            return Err(CoachError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await.map_err(reqwest::Error::without_url)?;
        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Text generation succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        Ok(body)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.call(prompt).await?.text().ok_or(CoachError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Day 1: "}, {"text": "Walk - 20 minutes"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 7}
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.text().as_deref(), Some("Day 1: Walk - 20 minutes"));
        assert_eq!(response.usage_metadata.unwrap().candidates_token_count, 7);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());

        let blocked = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateResponse = serde_json::from_str(blocked).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let json = serde_json::to_value(GenerateRequest::from_prompt("hello")).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(
            Some("k".to_string()),
            "gemini-test",
            "http://localhost:9/v1beta/",
            DEFAULT_TIMEOUT,
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_api_key() {
        // nothing listens on the discard port
        let client = GeminiClient::new(
            Some("SECRET_KEY_123".to_string()),
            DEFAULT_MODEL,
            "http://127.0.0.1:9/v1beta",
            Duration::from_secs(2),
        )
        .unwrap();

        let error = client.generate("hi").await.unwrap_err();
        assert!(matches!(error, CoachError::Http { .. }));

        let shown = crate::coach::Coach::describe_failure(&error);
        assert!(shown.starts_with("생성 중 오류가 발생했습니다"));
        assert!(!shown.contains("SECRET_KEY_123"));
        assert!(!format!("{error:?}").contains("SECRET_KEY_123"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client =
            GeminiClient::new(Some("  ".to_string()), DEFAULT_MODEL, DEFAULT_API_BASE, DEFAULT_TIMEOUT)
                .unwrap();
        assert!(!client.has_api_key());
        assert!(matches!(
            client.generate("hi").await,
            Err(CoachError::MissingApiKey)
        ));
    }
}
