//! Description Generator Client backed by the Gemini REST API.

use async_trait::async_trait;
use mcstatus_models::ServerStatus;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::client::DescriptionGenerator;
use crate::error::SdkError;
use crate::prompt::build_prompt;

/// Gemini REST endpoint root.
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Connection parameters for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`. Required.
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// REST root, without trailing `/models`.
    pub api_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_url: DEFAULT_GEMINI_API_URL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Client for Gemini `generateContent`.
pub struct GeminiClient {
    api_key: String,
    model: String,
    endpoint: String,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Build a client. Fails with [`SdkError::Config`] when no API key is
    /// configured.
    pub fn new(config: GeminiConfig) -> Result<Self, SdkError> {
        let api_key = config
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SdkError::Config("API_KEY environment variable not set".into()))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_url.trim_end_matches('/'),
            config.model
        );

        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| SdkError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            model: config.model,
            endpoint,
            http,
        })
    }

    /// Configured model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Full `generateContent` URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiClient {
    async fn describe(&self, status: &ServerStatus) -> Result<String, SdkError> {
        let prompt = build_prompt(status);
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        debug!(model = %self.model, "requesting server description");
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(generation_failure)?;

        let http_status = response.status();
        if !http_status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(generation_failure(format!(
                "Gemini API error {http_status}: {text}"
            )));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(generation_failure)?;
        let text = parsed
            .into_text()
            .ok_or_else(|| generation_failure("response contained no text"))?;

        info!(model = %self.model, chars = text.len(), "server description generated");
        Ok(text)
    }
}

fn generation_failure(detail: impl std::fmt::Display) -> SdkError {
    warn!(error = %detail, "description generation failed");
    SdkError::Generation {
        detail: detail.to_string(),
    }
}

/// Stand-in generator used when [`GeminiClient`] could not be built.
///
/// Every call fails with [`SdkError::Generation`]; the rest of the terminal
/// keeps working.
#[derive(Debug, Clone)]
pub struct UnavailableGenerator {
    reason: String,
}

impl UnavailableGenerator {
    /// Wrap the startup failure that disabled generation.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl DescriptionGenerator for UnavailableGenerator {
    async fn describe(&self, _status: &ServerStatus) -> Result<String, SdkError> {
        Err(generation_failure(&self.reason))
    }
}
