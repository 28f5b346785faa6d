// Conversation history for multi-turn interactions

use serde::{Deserialize, Serialize};

use crate::providers::ChatMessage;

/// One completed user/assistant exchange. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    user_text: String,
    assistant_text: String,
}

impl Turn {
    pub fn new(user_text: impl Into<String>, assistant_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            assistant_text: assistant_text.into(),
        }
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn assistant_text(&self) -> &str {
        &self.assistant_text
    }
}

/// Layout of prior turns in a provider request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryOrder {
    /// u1, a1, u2, a2, ...
    #[default]
    Interleaved,
    /// u1, u2, ..., a1, a2, ... (the legacy layout)
    Grouped,
}

/// Encode turns as role-tagged messages, two per turn.
pub fn encode_history(turns: &[Turn], order: HistoryOrder) -> Vec<ChatMessage> {
    match order {
        HistoryOrder::Interleaved => turns
            .iter()
            .flat_map(|turn| {
                [
                    ChatMessage::user(turn.user_text.clone()),
                    ChatMessage::assistant(turn.assistant_text.clone()),
                ]
            })
            .collect(),
        HistoryOrder::Grouped => turns
            .iter()
            .map(|turn| ChatMessage::user(turn.user_text.clone()))
            .chain(
                turns
                    .iter()
                    .map(|turn| ChatMessage::assistant(turn.assistant_text.clone())),
            )
            .collect(),
    }
}

/// Ordered log of turns, oldest first
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed exchange
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Forget all turns (start fresh)
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn encode(&self, order: HistoryOrder) -> Vec<ChatMessage> {
        encode_history(&self.turns, order)
    }
}
