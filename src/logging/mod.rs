// Tracing subscriber setup
//
// RUST_LOG wins when set. Otherwise verbosity picks the crate's level while
// HTTP client/server internals stay at warn. Interactive chat starts one
// level quieter than the server.

use tracing_subscriber::EnvFilter;

const LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];

/// Filter directives for a `-v` count.
pub fn default_directives(verbosity: u8, interactive: bool) -> String {
    let base = if interactive { 0 } else { 1 };
    let level = LEVELS[(base + verbosity as usize).min(LEVELS.len() - 1)];
    format!("numnum={level},tower_http={level},hyper=warn,reqwest=warn")
}

/// Install the global fmt subscriber. Logs go to stderr so the chat stays clean on stdout.
pub fn init(verbosity: u8, interactive: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity, interactive)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
