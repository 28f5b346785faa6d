// LLM provider support
//
// The session talks to the model through `LlmProvider`, so the Gemini client
// can be swapped for a scripted fake in tests or another hosted API later.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::config::constants::DEFAULT_REQUEST_TIMEOUT_SECS;

pub mod gemini;
pub mod retry;
pub mod types;

pub use gemini::GeminiProvider;
pub use retry::{with_retry, RetryPolicy};
pub use types::{ChatMessage, ProviderReply, ProviderRequest, Role};

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a conversation and wait for the complete reply
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderReply>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Get the default model for this provider
    fn default_model(&self) -> &str;

    /// Longest a single `send_message` may take, retries included
    fn call_budget(&self) -> Duration {
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}
