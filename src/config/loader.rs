// Configuration loader
// Reads ~/.numnum/config.toml (or an explicit path), then applies environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::constants::{API_KEY_ENV_VARS, CONFIG_DIR_NAME};
use super::settings::{Config, FileConfig};
use crate::errors::{RelayError, Result};

/// Load configuration from the config file, `.env`, and the process environment.
///
/// Priority (highest to lowest):
/// 1. Environment variables (`NUMNUM_API_KEY` / `GEMINI_API_KEY`, `NUMNUM_MODEL`,
///    `NUMNUM_DATA_PATH`, `NUMNUM_BIND`), including those set by a `.env` file
/// 2. `explicit_path` if given, otherwise `~/.numnum/config.toml` if it exists
/// 3. Built-in defaults
///
/// A missing API key is a fatal `Configuration` error.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(RelayError::configuration(format!("Invalid .env file: {}", e))),
    }

    let file = match explicit_path {
        Some(path) => read_file_config(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_file_config(&path)?,
            _ => FileConfig::default(),
        },
    };

    resolve(file, |name| std::env::var(name).ok())
}

/// `~/.numnum/config.toml`, if a home directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join("config.toml"))
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        RelayError::configuration(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let file: FileConfig = toml::from_str(&contents).map_err(|e| {
        RelayError::configuration(format!("Cannot parse {}: {}", path.display(), e))
    })?;

    info!("Loaded configuration from {}", path.display());
    Ok(file)
}

/// Merge file settings with environment lookups into a runtime `Config`.
pub fn resolve<F>(file: FileConfig, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    let api_key = API_KEY_ENV_VARS
        .iter()
        .find_map(|name| non_empty(*name))
        .or(file.api_key.filter(|k| !k.trim().is_empty()))
        .ok_or_else(|| {
            RelayError::configuration(format!(
                "API key is not set. Export {} or add `api_key` to {}.",
                API_KEY_ENV_VARS.join(" or "),
                default_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.toml".to_string())
            ))
        })?;

    let mut config = Config::with_api_key(api_key);

    if let Some(model) = non_empty("NUMNUM_MODEL").or(file.model) {
        config.model = model;
    }
    if let Some(base_url) = file.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(data_path) = non_empty("NUMNUM_DATA_PATH")
        .map(PathBuf::from)
        .or(file.data_path)
    {
        config.data_path = data_path;
    }
    if let Some(bind) = non_empty("NUMNUM_BIND").or(file.bind_address) {
        config.bind_address = bind;
    }
    if let Some(timeout) = file.request_timeout_secs {
        if timeout == 0 {
            return Err(RelayError::configuration(
                "request_timeout_secs must be greater than zero",
            ));
        }
        config.request_timeout_secs = timeout;
    }
    if let Some(retries) = file.max_retries {
        config.max_retries = retries;
    }
    if let Some(order) = file.history_order {
        config.history_order = order;
    }
    if let Some(generation) = file.generation {
        config.generation = generation;
    }

    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}
