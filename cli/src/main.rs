//! TAPAS CLI - Browse local listening TCP ports
//!
//! Lists listening ports with the project, framework and container behind
//! each, and kills the owning process on request.

mod commands;
mod format;
mod logging;
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::Settings;
use crate::logging::LogTarget;

#[derive(Parser)]
#[command(name = "tapas")]
#[command(author, version, about = "Browse local listening TCP ports")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Disable interactive TUI mode
    #[arg(long, global = true)]
    no_tui: bool,

    /// Read configuration from this file instead of ~/.tapas/config.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use ASCII-only row indicators
    #[arg(long, global = true)]
    ascii: bool,

    /// Start the TUI in watch mode
    #[arg(long, global = true)]
    watch: bool,

    /// Watch-mode refresh interval in seconds
    #[arg(long, global = true, value_name = "SECS")]
    interval: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all listening ports
    #[command(alias = "ls")]
    List {
        /// Filter by port number
        #[arg(short, long)]
        port: Option<u16>,

        /// Filter by process name
        #[arg(short = 'n', long)]
        name: Option<String>,
    },

    /// Kill the processes listening on a port
    Kill {
        /// Port number to kill
        port: u16,

        /// Force kill (SIGKILL) without graceful shutdown
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = cli.command.is_none() && !cli.no_tui && atty::is(atty::Stream::Stdout);
    logging::init(if interactive {
        LogTarget::File
    } else {
        LogTarget::Stderr
    });

    let settings = Settings::load(cli.config.clone())
        .await?
        .with_overrides(cli.ascii, cli.watch, cli.interval);

    match cli.command {
        Some(Commands::List { port, name }) => {
            commands::list::run(&settings, port, name, cli.json).await?;
        }
        Some(Commands::Kill { port, force }) => {
            commands::kill::run(&settings, port, force).await?;
        }
        Some(Commands::Config) => {
            commands::config::show(&settings, cli.json)?;
        }
        None => {
            // Default: Launch TUI or list ports
            if interactive {
                tui::run(&settings).await?;
            } else {
                commands::list::run(&settings, None, None, cli.json).await?;
            }
        }
    }

    Ok(())
}
