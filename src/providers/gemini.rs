// Google Gemini API provider implementation
//
// Gemini names the assistant role "model" and nests text inside `parts`,
// so requests and responses need their own conversion logic.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::retry::{with_retry, RetryPolicy};
use super::types::{ChatMessage, ProviderReply, ProviderRequest, Role};
use super::LlmProvider;
use crate::config::constants::{DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, GEMINI_BASE_URL};
use crate::config::{Config, GenerationSettings};

/// Google Gemini API provider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
    generation: GenerationSettings,
    timeout: Duration,
    retry: RetryPolicy,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Create a provider whose HTTP client gives up after `timeout`
    pub fn with_timeout(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            generation: GenerationSettings::default(),
            timeout,
            retry: RetryPolicy::none(),
        })
    }

    /// Build from resolved configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(
            Self::with_timeout(config.api_key.clone(), config.request_timeout())?
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_generation(config.generation.clone())
                .with_retry_policy(RetryPolicy::new(config.max_retries)),
        )
    }

    /// Create with custom default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point at a different API root (proxies, mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_generation(mut self, generation: GenerationSettings) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Convert ProviderRequest to Gemini API format
    fn to_gemini_request(&self, request: &ProviderRequest) -> GeminiRequest {
        let contents = request.messages.iter().map(GeminiContent::from).collect();

        let generation = &self.generation;
        let generation_config = GeminiGenerationConfig {
            temperature: Some(generation.temperature),
            top_p: Some(generation.top_p),
            top_k: Some(generation.top_k),
            max_output_tokens: Some(generation.max_output_tokens),
        };

        GeminiRequest {
            model: self.default_model.clone(),
            contents,
            generation_config: Some(generation_config),
        }
    }

    /// Send a single message request (no retry)
    ///
    /// The key travels in the `x-goog-api-key` header so that it never shows
    /// up in a request URL, and therefore never in a transport error.
    async fn send_message_once(&self, request: &ProviderRequest) -> Result<ProviderReply> {
        let gemini_request = self.to_gemini_request(request);
        let model = gemini_request.model.clone();

        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        tracing::debug!(
            "Sending request to Gemini API: model={} contents={}",
            model,
            gemini_request.contents.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .header("content-type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Gemini API request failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        let body = response
            .text()
            .await
            .context("Failed to read Gemini API response")?;

        let reply = parse_reply(&body)?;

        tracing::debug!(
            "Received response ({} chars, degraded={})",
            reply.text().len(),
            reply.is_degraded()
        );

        Ok(reply)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderReply> {
        with_retry(self.retry, || self.send_message_once(request)).await
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn call_budget(&self) -> Duration {
        self.retry.worst_case(self.timeout)
    }
}

/// Turn a 2xx response body into a reply.
///
/// Bodies that are not JSON are errors. JSON without any candidate text is
/// still an answer from the provider, so it comes back `Degraded` with the
/// raw JSON rather than failing.
fn parse_reply(body: &str) -> Result<ProviderReply> {
    let raw: serde_json::Value =
        serde_json::from_str(body).context("Failed to parse Gemini API response")?;

    let text = serde_json::from_value::<GeminiResponse>(raw.clone())
        .ok()
        .and_then(|response| response.candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty());

    match text {
        Some(text) => Ok(ProviderReply::Success(text)),
        None => {
            tracing::warn!("Gemini response carried no text; falling back to raw body");
            Ok(ProviderReply::Degraded(raw.to_string()))
        }
    }
}

// Gemini API types

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip)]
    model: String, // Used in URL, not in body
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String, // "user" or "model"
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl From<&ChatMessage> for GeminiContent {
    fn from(msg: &ChatMessage) -> Self {
        // Gemini uses "model" instead of "assistant"
        let role = match msg.role {
            Role::User => "user",
            Role::Assistant => "model",
        };
        Self {
            role: role.to_string(),
            parts: vec![GeminiPart {
                text: Some(msg.text.clone()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}
