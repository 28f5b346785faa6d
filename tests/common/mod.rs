// Shared test helpers: a scripted provider and a ready-made session

#![allow(dead_code)]

use async_trait::async_trait;
use numnum::context::{build_preamble, ContextDocument};
use numnum::providers::{LlmProvider, ProviderReply, ProviderRequest};
use numnum::session::ConversationSession;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const DATASET: &str =
    "Name: Pasta Bella | Cuisine: Italian | Popular dishes: spaghetti carbonara";

/// Replays canned results in order, then answers "ok". Records every request.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<anyhow::Result<ProviderReply>>>,
    seen: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<anyhow::Result<ProviderReply>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(texts: &[&str]) -> Arc<Self> {
        Self::new(
            texts
                .iter()
                .map(|t| Ok(ProviderReply::Success(t.to_string())))
                .collect(),
        )
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::new(vec![Err(anyhow::anyhow!(message.to_string()))])
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn send_message(&self, request: &ProviderRequest) -> anyhow::Result<ProviderReply> {
        self.seen.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(ProviderReply::Success("ok".to_string())))
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-1"
    }
}

pub fn session_with(provider: Arc<ScriptedProvider>) -> Arc<ConversationSession> {
    let preamble = build_preamble(&ContextDocument::from_text(DATASET));
    Arc::new(ConversationSession::new(Arc::new(preamble), provider))
}
