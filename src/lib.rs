// NumNum - restaurant chat relay
// Library exports

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod logging;
pub mod providers;
pub mod server;
pub mod session;

pub use bootstrap::{build_session, build_session_with};
pub use errors::{RelayError, Result};
