//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Init failures carry the SDK result code and the SDK's own message.
//! - Ticket and identity failures name the step that failed, so callers can
//!   tell a rejected request from a ticket that is not ready yet.
//! - The C ABI still collapses all of these to `false`/`0`.

use thiserror::Error;

use crate::status::InitResultCode;

/// The SDK refused to initialize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("steam api init failed ({code}): {message}")]
pub struct InitError {
    /// Result code reported by the SDK.
    pub code: InitResultCode,
    /// Message the SDK wrote into its error slot. May be empty.
    pub message: String,
}

impl InitError {
    /// Build an init error from a result code and message.
    pub fn new(code: InitResultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failure of a bridge operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Session initialization failed.
    #[error(transparent)]
    Init(#[from] InitError),

    /// The SDK could not resolve the current user interface.
    #[error("steam user interface unavailable (sdk not initialized or no signed-in user)")]
    UserUnavailable,

    /// The SDK returned the invalid call handle for a ticket request.
    #[error("encrypted app ticket request was rejected by the sdk")]
    TicketRequestRejected,

    /// The SDK reported no ticket for a buffer of the given capacity.
    #[error("no encrypted app ticket available (buffer capacity {capacity} bytes)")]
    TicketUnavailable {
        /// Capacity of the buffer handed to the SDK.
        capacity: usize,
    },

    /// The ticket did not become available within the polling budget.
    #[error("encrypted app ticket not ready after {attempts} attempts ({waited_ms}ms)")]
    TicketTimeout {
        /// Number of retrieval attempts made.
        attempts: u32,
        /// Total time spent sleeping between attempts.
        waited_ms: u64,
    },
}

/// Error while loading bridge configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for `BridgeConfig`.
    #[error("invalid config file {path}: {source}")]
    Yaml {
        /// Path that was being parsed.
        path: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// An environment variable or field held an unusable value.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable or field name.
        key: String,
        /// Offending raw value.
        value: String,
    },

    /// No app id was configured but the operation needs one.
    #[error("no app id configured (pass --app-id or set SteamAppId)")]
    MissingAppId,
}

/// Error parsing a platform identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Not a positive 32-bit decimal app id.
    #[error("invalid app id: {0:?}")]
    InvalidAppId(String),

    /// Not a non-zero 64-bit steam id.
    #[error("invalid steam id: {0:?}")]
    InvalidSteamId(String),
}
