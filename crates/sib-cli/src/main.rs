//! # sib CLI entry point
//!
//! Parses command-line arguments, resolves configuration, exports the
//! AppID for the SDK, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sib_bridge::SessionBridge;
use sib_cli::resolve_config;
use sib_cli::steam_id::{run_steam_id, SteamIdArgs};
use sib_cli::ticket::{run_ticket, TicketArgs};

/// Steam identity bridge: encrypted app tickets and SteamIDs from the
/// local Steam client.
#[derive(Parser, Debug)]
#[command(name = "sib", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Request an encrypted app ticket and print it with the SteamID.
    Ticket(TicketArgs),

    /// Print the signed-in user's SteamID.
    SteamId(SteamIdArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "sib starting");

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let bridge = SessionBridge::new(sib_sdk::default_sdk());
    let mut stdout = std::io::stdout().lock();

    let result = match cli.command {
        Commands::Ticket(args) => {
            let config = args.apply(resolve_config(cli.config.as_deref(), args.app_id)?)?;
            let app_id = config.export_app_id()?;
            tracing::debug!(%app_id, "exported app id for the steam api");
            run_ticket(&config, args.format, &bridge, &mut stdout)
        }
        Commands::SteamId(args) => {
            let config = resolve_config(cli.config.as_deref(), args.app_id)?;
            config.export_app_id()?;
            run_steam_id(args.format, &bridge, &mut stdout)
        }
    };

    bridge.shutdown();
    result
}
