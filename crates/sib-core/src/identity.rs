//! # Platform Identifier Newtypes
//!
//! `SteamId`, `AppId`, and `ApiCallHandle` keep the raw integers the SDK
//! hands out from being mixed up with one another.
//!
//! ## SteamID64 Layout
//!
//! | Bits   | Field        |
//! |--------|--------------|
//! | 0..32  | account id   |
//! | 32..52 | instance     |
//! | 52..56 | account type |
//! | 56..64 | universe     |
//!
//! The bridge never validates these fields; the views below are read-only
//! conveniences for display and logging.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Platform-assigned 64-bit user identifier. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SteamId(u64);

/// Steam universe encoded in the top byte of a SteamID64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Universe {
    Invalid,
    Public,
    Beta,
    Internal,
    Dev,
    Unknown(u8),
}

/// Account type encoded in bits 52..56 of a SteamID64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Invalid,
    Individual,
    Multiseat,
    GameServer,
    AnonGameServer,
    Pending,
    ContentServer,
    Clan,
    Chat,
    ConsoleUser,
    AnonUser,
    Unknown(u8),
}

impl SteamId {
    /// Wrap a raw identifier. Returns `None` for the zero sentinel.
    pub fn new(raw: u64) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Low 32 bits.
    pub fn account_id(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    pub fn instance(self) -> u32 {
        ((self.0 >> 32) & 0xF_FFFF) as u32
    }

    pub fn account_type(self) -> AccountType {
        AccountType::from_raw(((self.0 >> 52) & 0xF) as u8)
    }

    pub fn universe(self) -> Universe {
        Universe::from_raw((self.0 >> 56) as u8)
    }

    /// Render as `[U:1:22202]`.
    pub fn steam3(self) -> String {
        format!(
            "[{}:{}:{}]",
            self.account_type().letter(),
            self.universe().as_raw(),
            self.account_id()
        )
    }
}

impl Universe {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Invalid,
            1 => Self::Public,
            2 => Self::Beta,
            3 => Self::Internal,
            4 => Self::Dev,
            other => Self::Unknown(other),
        }
    }

    pub fn as_raw(self) -> u8 {
        match self {
            Self::Invalid => 0,
            Self::Public => 1,
            Self::Beta => 2,
            Self::Internal => 3,
            Self::Dev => 4,
            Self::Unknown(raw) => raw,
        }
    }
}

impl AccountType {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Invalid,
            1 => Self::Individual,
            2 => Self::Multiseat,
            3 => Self::GameServer,
            4 => Self::AnonGameServer,
            5 => Self::Pending,
            6 => Self::ContentServer,
            7 => Self::Clan,
            8 => Self::Chat,
            9 => Self::ConsoleUser,
            10 => Self::AnonUser,
            other => Self::Unknown(other),
        }
    }

    /// Letter used in the bracketed steam3 rendering.
    pub fn letter(self) -> char {
        match self {
            Self::Individual => 'U',
            Self::Multiseat => 'M',
            Self::GameServer => 'G',
            Self::AnonGameServer => 'A',
            Self::Pending => 'P',
            Self::ContentServer => 'C',
            Self::Clan => 'g',
            Self::Chat => 'T',
            Self::AnonUser => 'a',
            Self::Invalid | Self::ConsoleUser | Self::Unknown(_) => 'I',
        }
    }
}

impl std::fmt::Display for SteamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| IdentityError::InvalidSteamId(s.to_string()))
    }
}

impl TryFrom<u64> for SteamId {
    type Error = IdentityError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| IdentityError::InvalidSteamId(raw.to_string()))
    }
}

impl From<SteamId> for u64 {
    fn from(id: SteamId) -> Self {
        id.0
    }
}

/// Steam application identifier. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AppId(u32);

impl AppId {
    /// Wrap a raw app id. Returns `None` for zero.
    pub fn new(raw: u32) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| IdentityError::InvalidAppId(s.to_string()))
    }
}

impl TryFrom<u32> for AppId {
    type Error = IdentityError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| IdentityError::InvalidAppId(raw.to_string()))
    }
}

impl From<AppId> for u32 {
    fn from(id: AppId) -> Self {
        id.0
    }
}

/// Opaque handle for an asynchronous SDK call.
///
/// Owned and invalidated by the SDK; the bridge only checks it against the
/// invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiCallHandle(pub u64);

impl ApiCallHandle {
    /// `k_uAPICallInvalid`
    pub const INVALID: Self = Self(0);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}
