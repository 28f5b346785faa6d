// Provider-agnostic request/response types
//
// The session speaks in these; each provider maps them onto its own wire
// format (Gemini uses "model" where we say "assistant", for instance).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged entry in a provider request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Unified request format for all LLM providers
///
/// Model and sampling settings belong to the provider; a request only
/// carries the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRequest {
    /// Prior history followed by the message for this turn
    pub messages: Vec<ChatMessage>,
}

impl ProviderRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

/// Outcome of a completion call that reached the provider and got a parseable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReply {
    /// Well-formed reply carrying generated text
    Success(String),
    /// The response parsed but held no text; carries the raw response instead
    Degraded(String),
}

impl ProviderReply {
    pub fn text(&self) -> &str {
        match self {
            ProviderReply::Success(text) | ProviderReply::Degraded(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ProviderReply::Success(text) | ProviderReply::Degraded(text) => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ProviderReply::Degraded(_))
    }
}
