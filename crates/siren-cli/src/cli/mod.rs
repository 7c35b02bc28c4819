//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use siren_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "siren")]
#[command(version)]
#[command(about = "Terminal client for emergency events")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the gateway base URL from config
    #[arg(long, value_name = "URL")]
    gateway_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Inspect events without the TUI
    Events {
        #[command(subcommand)]
        command: EventsCommands,
    },

    /// One-shot check of the gateway's release endpoint
    CheckUpdate,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum EventsCommands {
    /// Drain the event feed and print it, newest first
    List {
        /// Stop after this many events
        #[arg(long, value_name = "N")]
        take: Option<usize>,

        /// Give up waiting for the feed after this many seconds
        #[arg(long, default_value_t = 5)]
        timeout_secs: u64,
    },
    /// Show one event and its acknowledgements
    Show {
        /// The id of the event to show
        #[arg(value_name = "EVENT_ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(url) = cli.gateway_url {
        config.gateway.base_url = url;
    }

    // default to watch mode
    let Some(command) = cli.command else {
        // Logs go to a file; the TUI owns the terminal.
        let _log_guard = siren_core::logging::init().context("init logging")?;
        return commands::watch::run(&config);
    };

    match command {
        Commands::Events { command } => match command {
            EventsCommands::List { take, timeout_secs } => {
                commands::events::list(&config, take, timeout_secs).await
            }
            EventsCommands::Show { id } => commands::events::show(&config, id).await,
        },

        Commands::CheckUpdate => commands::update::check(&config).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
