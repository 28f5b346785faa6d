// Startup wiring: configuration -> context -> provider -> session
//
// Everything here runs before a listener binds or the REPL prints a prompt,
// so any error returned is fatal.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::context::{build_preamble, ContextDocument};
use crate::errors::{RelayError, Result};
use crate::providers::{GeminiProvider, LlmProvider};
use crate::session::ConversationSession;

/// Build the process-wide session backed by Gemini.
pub fn build_session(config: &Config) -> Result<Arc<ConversationSession>> {
    let provider = GeminiProvider::from_config(config).map_err(|e| {
        RelayError::configuration(format!("Failed to initialise Gemini client: {:#}", e))
    })?;
    build_session_with(config, Arc::new(provider))
}

/// Build the session around an already constructed provider.
pub fn build_session_with(
    config: &Config,
    provider: Arc<dyn LlmProvider>,
) -> Result<Arc<ConversationSession>> {
    let document = ContextDocument::load(&config.data_path)?;
    let provider_budget = provider.call_budget();
    let preamble = Arc::new(build_preamble(&document));

    info!(
        "Session ready: provider={} model={} history={:?} budget={:?}",
        provider.name(),
        config.model,
        config.history_order,
        provider_budget
    );

    let session = ConversationSession::new(preamble, provider)
        .with_history_order(config.history_order)
        .with_timeout(provider_budget);

    Ok(Arc::new(session))
}
