//! # Bridge Configuration
//!
//! Settings for callers that drive the full ticket flow (the CLI, or any
//! host using `TicketPoller`). The four bridge operations themselves take no
//! configuration.
//!
//! Layering: defaults, then an optional YAML file, then environment
//! variables, then explicit overrides by the caller.
//!
//! Variables:
//! - `SteamAppId`: app id to initialize the SDK for
//! - `SIB_TICKET_CAPACITY` (default: 2048)
//! - `SIB_POLL_ATTEMPTS` (default: 100)
//! - `SIB_POLL_INTERVAL_MS` (default: 100)

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::identity::AppId;
use crate::ticket::DEFAULT_TICKET_CAPACITY;

/// Environment variable the SDK reads its app id from.
pub const STEAM_APP_ID_VAR: &str = "SteamAppId";
/// Environment variable the SDK reads its game id from.
pub const STEAM_GAME_ID_VAR: &str = "SteamGameId";

const DEFAULT_POLL_ATTEMPTS: u32 = 100;
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// App the SDK session is opened for.
    pub app_id: Option<AppId>,
    /// Size of the buffer handed to the SDK for ticket retrieval.
    pub ticket_capacity: usize,
    /// How many times to try retrieving the ticket before giving up.
    pub poll_attempts: u32,
    /// Sleep between retrieval attempts.
    pub poll_interval_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            ticket_capacity: DEFAULT_TICKET_CAPACITY,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl BridgeConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// Load a YAML file. Missing fields keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: display,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable source.
    pub fn with_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(app_id) = parse_var::<AppId, _>(&lookup, STEAM_APP_ID_VAR)? {
            self.app_id = Some(app_id);
        }
        if let Some(capacity) = parse_var(&lookup, "SIB_TICKET_CAPACITY")? {
            self.ticket_capacity = capacity;
        }
        if let Some(attempts) = parse_var(&lookup, "SIB_POLL_ATTEMPTS")? {
            self.poll_attempts = attempts;
        }
        if let Some(interval) = parse_var(&lookup, "SIB_POLL_INTERVAL_MS")? {
            self.poll_interval_ms = interval;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject values that would make the ticket flow meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticket_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ticket_capacity".to_string(),
                value: "0".to_string(),
            });
        }
        if self.poll_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "poll_attempts".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn require_app_id(&self) -> Result<AppId, ConfigError> {
        self.app_id.ok_or(ConfigError::MissingAppId)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Publish the app id where the SDK looks for it.
    ///
    /// Must run before SDK initialization. Sets both `SteamAppId` and
    /// `SteamGameId` for the current process.
    pub fn export_app_id(&self) -> Result<AppId, ConfigError> {
        let app_id = self.require_app_id()?;
        let value = app_id.to_string();
        std::env::set_var(STEAM_APP_ID_VAR, &value);
        std::env::set_var(STEAM_GAME_ID_VAR, &value);
        Ok(app_id)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}
