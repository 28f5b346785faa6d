// Project-wide constants
//
// Centralised here so ports, model names, and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default bind address for `numnum serve` (Flask's development port).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:5000";

/// Dataset file read at startup when no path is configured.
pub const DEFAULT_DATA_PATH: &str = "data/Num_Data.txt";

/// Gemini model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini REST endpoint root.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on a single provider call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Extra attempts after a failed provider call. Zero means a single attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 0;

/// Base delay for exponential backoff between provider retries.
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Environment variables consulted for the API credential, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["NUMNUM_API_KEY", "GEMINI_API_KEY"];

/// Directory under $HOME holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = ".numnum";

/// Sampling defaults sent as Gemini `generationConfig`.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_TOP_K: i32 = 40;
pub const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 8192;
