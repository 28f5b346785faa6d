// NumNum - restaurant chat relay
// Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use numnum::cli::ChatRepl;
use numnum::config::load_config;
use numnum::server::{RelayServer, ServerConfig};

#[derive(Parser)]
#[command(name = "numnum", version, about = "Chat with Num about places to eat")]
struct Cli {
    /// Path to config.toml (default: ~/.numnum/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset file injected into every prompt
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat on the terminal (default)
    Chat,
    /// Serve the JSON API
    Serve {
        /// Bind address, e.g. 0.0.0.0:5000
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Chat);

    numnum::logging::init(cli.verbose, matches!(command, Commands::Chat));

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let session = numnum::build_session(&config)?;

    match command {
        Commands::Chat => ChatRepl::new(session).run().await,
        Commands::Serve { bind } => {
            let mut server_config = ServerConfig::from(&config);
            if let Some(bind) = bind {
                server_config.bind_address = bind;
            }
            RelayServer::new(session, server_config).serve().await
        }
    }
}
