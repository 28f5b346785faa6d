// Error taxonomy for the relay
//
// Startup errors (context load, configuration) abort the process.
// Per-request errors (provider call, validation) are converted into
// structured responses at the HTTP/CLI boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Dataset file missing or unreadable
    #[error("Failed to load context document '{}': {source}", .path.display())]
    ContextLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Missing credential or malformed configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network failure, timeout, or malformed provider response
    #[error("{:#}", .0)]
    ProviderCall(anyhow::Error),

    /// Request rejected before any provider call was made
    #[error("{0}")]
    Validation(String),
}

impl RelayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
