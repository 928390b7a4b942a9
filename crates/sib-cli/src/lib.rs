//! # sib-cli: Steam Identity Bridge Command-Line Interface
//!
//! ## Subcommands
//!
//! - `ticket`: initialize for an AppID, request an encrypted app ticket,
//!   wait for it, and print it (Base64) with the signed-in SteamID
//! - `steam-id`: initialize and print the signed-in SteamID
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; SDK calls go through `sib-bridge`.
//! - Handlers are generic over the SDK backend so they run against
//!   `MockSdk` in tests.
//! - Results go to stdout, logs to stderr.

use std::path::Path;

use anyhow::{Context, Result};

use sib_core::{AppId, BridgeConfig};

pub mod output;
pub mod steam_id;
pub mod ticket;

/// Layer configuration: file (or defaults), then environment, then flags.
pub fn resolve_config(path: Option<&Path>, app_id: Option<AppId>) -> Result<BridgeConfig> {
    let base = match path {
        Some(path) => BridgeConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => BridgeConfig::default(),
    };
    let mut config = base.with_env().context("invalid environment configuration")?;
    if app_id.is_some() {
        config.app_id = app_id;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_app_id_wins() {
        let app_id = AppId::new(730);
        let config = resolve_config(None, app_id).unwrap();
        assert_eq!(config.app_id, app_id);
    }

    #[test]
    fn unreadable_config_file_has_context() {
        let err = resolve_config(Some(Path::new("/nonexistent/sib.yaml")), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sib.yaml"));
    }
}
