//! # Ticket Subcommand
//!
//! Runs the whole ticket flow for one AppID: initialize, request, poll
//! until the ticket is ready, then read the SteamID. The SteamID is looked
//! up after the ticket; a missing SteamID is reported but not fatal.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use sib_bridge::{SessionBridge, TicketPoller};
use sib_core::{AppId, BridgeConfig, SteamId};
use sib_sdk::SteamworksSdk;

use crate::output::{write_json, OutputFormat};

/// Arguments for the `sib ticket` subcommand.
#[derive(Args, Debug)]
pub struct TicketArgs {
    /// Steam AppID to request the ticket for. Defaults to $SteamAppId.
    #[arg(long)]
    pub app_id: Option<AppId>,

    /// Ticket buffer size in bytes.
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Retrieval attempts before giving up.
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Milliseconds to wait between attempts.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl TicketArgs {
    /// Apply flag overrides on top of a resolved configuration.
    pub fn apply(&self, mut config: BridgeConfig) -> Result<BridgeConfig> {
        if let Some(capacity) = self.capacity {
            config.ticket_capacity = capacity;
        }
        if let Some(attempts) = self.attempts {
            config.poll_attempts = attempts;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.poll_interval_ms = interval_ms;
        }
        config.validate()?;
        Ok(config)
    }
}

/// What `sib ticket` prints.
#[derive(Debug, Serialize)]
pub struct TicketReport {
    pub app_id: AppId,
    pub steam_id: Option<SteamId>,
    pub steam3: Option<String>,
    pub ticket_base64: String,
    pub ticket_len: usize,
    pub ticket_sha256: String,
    pub obtained_at: DateTime<Utc>,
}

/// Obtain a ticket through `bridge` and write the report to `out`.
///
/// The app id must already be exported to the environment before the
/// bridge's SDK is initialized; `main` does that.
pub fn run_ticket<S, W>(
    config: &BridgeConfig,
    format: OutputFormat,
    bridge: &SessionBridge<S>,
    out: &mut W,
) -> Result<u8>
where
    S: SteamworksSdk,
    W: Write,
{
    let app_id = config.require_app_id()?;
    let report = obtain_report(app_id, config, bridge)?;

    match format {
        OutputFormat::Json => write_json(out, &report)?,
        OutputFormat::Text => {
            match report.steam_id {
                Some(id) => writeln!(out, "Steam ID: {id}")?,
                None => writeln!(out, "Steam ID: unavailable")?,
            }
            writeln!(out, "Ticket length: {} bytes", report.ticket_len)?;
            writeln!(out, "Ticket SHA-256: {}", report.ticket_sha256)?;
            writeln!(out, "Encrypted App Ticket (Base64): {}", report.ticket_base64)?;
        }
    }
    Ok(0)
}

fn obtain_report<S: SteamworksSdk>(
    app_id: AppId,
    config: &BridgeConfig,
    bridge: &SessionBridge<S>,
) -> Result<TicketReport> {
    bridge
        .initialize()
        .context("Steam initialization failed; make sure the Steam client is running")?;

    bridge
        .request_encrypted_app_ticket()
        .context("failed to request encrypted app ticket; check the Steam connection")?;

    let poller = TicketPoller::from_config(config);
    tracing::info!(
        %app_id,
        attempts = poller.attempts,
        interval_ms = config.poll_interval_ms,
        "waiting for encrypted app ticket"
    );
    let ticket = poller
        .wait_for_ticket(bridge)
        .context("failed to get encrypted app ticket")?;

    let steam_id = match bridge.steam_id() {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::warn!(error = %err, "could not read steam id");
            None
        }
    };

    Ok(TicketReport {
        app_id,
        steam_id,
        steam3: steam_id.map(SteamId::steam3),
        ticket_base64: ticket.to_base64(),
        ticket_len: ticket.len(),
        ticket_sha256: ticket.sha256_hex(),
        obtained_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sib_core::InitResultCode;
    use sib_sdk::MockSdk;

    fn config() -> BridgeConfig {
        BridgeConfig {
            app_id: AppId::new(480),
            poll_attempts: 5,
            poll_interval_ms: 0,
            ..BridgeConfig::default()
        }
    }

    fn args() -> TicketArgs {
        TicketArgs {
            app_id: None,
            capacity: None,
            attempts: None,
            interval_ms: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn text_report_lists_id_and_ticket() {
        let bridge = SessionBridge::new(MockSdk::new().with_ticket_after_frames(b"hi", 1));
        let mut out = Vec::new();
        let code = run_ticket(&config(), OutputFormat::Text, &bridge, &mut out).unwrap();
        assert_eq!(code, 0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Steam ID: 76561197960287930"));
        assert!(text.contains("Ticket length: 2 bytes"));
        assert!(text.contains("Encrypted App Ticket (Base64): aGk="));
    }

    #[test]
    fn json_report_is_machine_readable() {
        let bridge = SessionBridge::new(MockSdk::new().with_ticket(b"hi"));
        let mut out = Vec::new();
        run_ticket(&config(), OutputFormat::Json, &bridge, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["app_id"], 480);
        assert_eq!(value["steam_id"], 76_561_197_960_287_930u64);
        assert_eq!(value["steam3"], "[U:1:22202]");
        assert_eq!(value["ticket_base64"], "aGk=");
        assert_eq!(value["ticket_len"], 2);
        assert!(value["obtained_at"].is_string());
    }

    #[test]
    fn missing_steam_id_is_not_fatal() {
        let bridge =
            SessionBridge::new(MockSdk::new().with_ticket(b"hi").with_steam_id(0));
        let mut out = Vec::new();
        run_ticket(&config(), OutputFormat::Text, &bridge, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Steam ID: unavailable"));
    }

    #[test]
    fn init_failure_stops_the_flow() {
        let sdk = MockSdk::new().with_init_failure(InitResultCode::NoSteamClient, "not running");
        let bridge = SessionBridge::new(sdk.clone());
        let mut out = Vec::new();

        let err = run_ticket(&config(), OutputFormat::Text, &bridge, &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("not running"));
        assert_eq!(sdk.calls().ticket_requests, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn timeout_is_reported() {
        let bridge = SessionBridge::new(MockSdk::new());
        let mut out = Vec::new();
        let err = run_ticket(&config(), OutputFormat::Text, &bridge, &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("not ready after 5 attempts"));
    }

    #[test]
    fn missing_app_id_fails_before_init() {
        let sdk = MockSdk::new();
        let bridge = SessionBridge::new(sdk.clone());
        let cfg = BridgeConfig {
            app_id: None,
            ..config()
        };
        let mut out = Vec::new();
        assert!(run_ticket(&cfg, OutputFormat::Text, &bridge, &mut out).is_err());
        assert_eq!(sdk.calls().init, 0);
    }

    #[test]
    fn flag_overrides_apply_and_validate() {
        let overridden = TicketArgs {
            capacity: Some(512),
            attempts: Some(7),
            interval_ms: Some(5),
            ..args()
        }
        .apply(BridgeConfig::default())
        .unwrap();
        assert_eq!(overridden.ticket_capacity, 512);
        assert_eq!(overridden.poll_attempts, 7);
        assert_eq!(overridden.poll_interval_ms, 5);

        let zero = TicketArgs {
            attempts: Some(0),
            ..args()
        };
        assert!(zero.apply(BridgeConfig::default()).is_err());
    }
}
