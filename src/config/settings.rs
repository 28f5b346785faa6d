// Configuration structs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::constants::*;
use crate::session::HistoryOrder;

/// Sampling parameters forwarded to the provider on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_top_k")]
    pub top_k: i32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: i32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_top_p() -> f32 {
    DEFAULT_TOP_P
}

fn default_top_k() -> i32 {
    DEFAULT_TOP_K
}

fn default_max_output_tokens() -> i32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

/// Resolved runtime configuration.
///
/// `api_key` is always present here: the loader refuses to build a `Config`
/// without one.
#[derive(Clone)]
pub struct Config {
    /// Gemini API key
    pub api_key: String,

    /// Gemini model name (e.g. "gemini-1.5-flash")
    pub model: String,

    /// Override for the Gemini REST root (tests point this at a mock server)
    pub base_url: String,

    /// Dataset file injected into every prompt
    pub data_path: PathBuf,

    /// Bind address for `numnum serve`
    pub bind_address: String,

    /// Upper bound on one provider call
    pub request_timeout_secs: u64,

    /// Extra attempts after a failed provider call
    pub max_retries: u32,

    /// How prior turns are laid out in the provider request
    pub history_order: HistoryOrder,

    pub generation: GenerationSettings,
}

impl Config {
    /// Build a config with defaults for everything but the credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            history_order: HistoryOrder::default(),
            generation: GenerationSettings::default(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// Keep the key out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("data_path", &self.data_path)
            .field("bind_address", &self.bind_address)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("history_order", &self.history_order)
            .field("generation", &self.generation)
            .finish()
    }
}

/// On-disk shape of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub data_path: Option<PathBuf>,
    #[serde(default)]
    pub bind_address: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub history_order: Option<HistoryOrder>,
    #[serde(default)]
    pub generation: Option<GenerationSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_api_key("k");
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.bind_address, "127.0.0.1:5000");
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.history_order, HistoryOrder::Interleaved);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.generation.top_k, 40);
        assert_eq!(config.generation.max_output_tokens, 8192);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::with_api_key("super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_partial_generation_section_fills_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
            [generation]
            temperature = 0.2
            "#,
        )
        .unwrap();
        let generation = file.generation.unwrap();
        assert_eq!(generation.temperature, 0.2);
        assert_eq!(generation.top_p, 0.95);
    }
}
