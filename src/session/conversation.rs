// Conversation session: one request/response cycle per user turn

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::history::{ConversationLog, HistoryOrder, Turn};
use crate::config::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::context::Preamble;
use crate::errors::{RelayError, Result};
use crate::providers::{ChatMessage, LlmProvider, ProviderReply, ProviderRequest};

/// Where the session is in its request cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next input
    Idle,
    /// A provider call is in flight
    AwaitingCompletion,
}

/// Stateful conversation handle.
///
/// The log lock is held for the whole encode-call-append cycle, so concurrent
/// `converse` calls run one at a time and never lose or duplicate turns.
pub struct ConversationSession {
    preamble: Arc<Preamble>,
    provider: Arc<dyn LlmProvider>,
    log: Mutex<ConversationLog>,
    in_flight: AtomicBool,
    history_order: HistoryOrder,
    timeout: Duration,
}

impl ConversationSession {
    pub fn new(preamble: Arc<Preamble>, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            preamble,
            provider,
            log: Mutex::new(ConversationLog::new()),
            in_flight: AtomicBool::new(false),
            history_order: HistoryOrder::default(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_history_order(mut self, order: HistoryOrder) -> Self {
        self.history_order = order;
        self
    }

    /// Bound on one provider call, retries included; elapsing counts as a provider failure
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    pub fn history_order(&self) -> HistoryOrder {
        self.history_order
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.load(Ordering::Acquire) {
            SessionState::AwaitingCompletion
        } else {
            SessionState::Idle
        }
    }

    /// Send one user turn and return the reply text.
    pub async fn converse(&self, user_input: &str) -> Result<String> {
        self.exchange(user_input).await.map(ProviderReply::into_text)
    }

    /// Like `converse`, but keeps the Success/Degraded distinction.
    ///
    /// On any failure the log is left exactly as it was.
    pub async fn exchange(&self, user_input: &str) -> Result<ProviderReply> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return Err(RelayError::validation("No input provided"));
        }

        let mut log = self.log.lock().await;
        let _in_flight = InFlight::enter(&self.in_flight);

        let request = self.build_request(&log, user_input);
        debug!(
            "Dispatching turn {} to {} ({} history messages)",
            log.len() + 1,
            self.provider.name(),
            request.messages.len() - 1
        );

        let reply = match tokio::time::timeout(self.timeout, self.provider.send_message(&request))
            .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                error!("Provider call failed: {:#}", e);
                return Err(RelayError::ProviderCall(e));
            }
            Err(_) => {
                error!("Provider call timed out after {:?}", self.timeout);
                return Err(RelayError::ProviderCall(anyhow::anyhow!(
                    "Provider call timed out after {:?}",
                    self.timeout
                )));
            }
        };

        if reply.text().trim().is_empty() {
            error!("Provider returned an empty reply");
            return Err(RelayError::ProviderCall(anyhow::anyhow!(
                "Provider returned an empty reply"
            )));
        }
        if reply.is_degraded() {
            warn!("Recording degraded reply (no text field in provider response)");
        }

        log.push(Turn::new(user_input, reply.text()));
        info!("Turn {} recorded", log.len());

        Ok(reply)
    }

    /// Provider payload for `user_input` given the current log.
    fn build_request(&self, log: &ConversationLog, user_input: &str) -> ProviderRequest {
        let mut messages = log.encode(self.history_order);
        messages.push(ChatMessage::user(self.preamble.compose(user_input)));
        ProviderRequest::new(messages)
    }

    /// Number of recorded turns (waits for any in-flight call)
    pub async fn turn_count(&self) -> usize {
        self.log.lock().await.len()
    }

    /// Snapshot of the recorded turns
    pub async fn turns(&self) -> Vec<Turn> {
        self.log.lock().await.turns().to_vec()
    }

    /// The history portion that the next request would carry
    pub async fn encoded_history(&self) -> Vec<ChatMessage> {
        self.log.lock().await.encode(self.history_order)
    }

    /// Drop all history
    pub async fn clear(&self) {
        self.log.lock().await.clear();
        info!("Conversation history cleared");
    }
}

/// Marks the session busy for as long as it lives, including when the
/// enclosing future is dropped mid-call.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
