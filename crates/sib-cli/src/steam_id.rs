//! # Steam ID Subcommand
//!
//! Initializes the SDK and prints the signed-in user's SteamID.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use sib_bridge::SessionBridge;
use sib_core::{AppId, SteamId};
use sib_sdk::SteamworksSdk;

use crate::output::{write_json, OutputFormat};

/// Arguments for the `sib steam-id` subcommand.
#[derive(Args, Debug)]
pub struct SteamIdArgs {
    /// Steam AppID to initialize for. Defaults to $SteamAppId.
    #[arg(long)]
    pub app_id: Option<AppId>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct SteamIdReport {
    steam_id: SteamId,
    steam3: String,
    account_id: u32,
}

pub fn run_steam_id<S, W>(format: OutputFormat, bridge: &SessionBridge<S>, out: &mut W) -> Result<u8>
where
    S: SteamworksSdk,
    W: Write,
{
    bridge
        .initialize()
        .context("Steam initialization failed; make sure the Steam client is running")?;
    let steam_id = bridge.steam_id().context("could not read steam id")?;

    match format {
        OutputFormat::Json => write_json(
            out,
            &SteamIdReport {
                steam_id,
                steam3: steam_id.steam3(),
                account_id: steam_id.account_id(),
            },
        )?,
        OutputFormat::Text => writeln!(out, "{steam_id} {}", steam_id.steam3())?,
    }
    Ok(0)
}
