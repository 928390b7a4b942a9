//! # SDK Init Result Codes
//!
//! Mirrors `ESteamAPIInitResult` from the flat Steamworks API. Only `Ok`
//! means the session is usable.

use serde::{Deserialize, Serialize};

/// Result of the SDK's flat init entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitResultCode {
    /// `k_ESteamAPIInitResult_OK`
    Ok,
    /// `k_ESteamAPIInitResult_FailedGeneric`
    FailedGeneric,
    /// `k_ESteamAPIInitResult_NoSteamClient`
    NoSteamClient,
    /// `k_ESteamAPIInitResult_VersionMismatch`
    VersionMismatch,
    /// A code this crate does not know about.
    Other(i32),
}

impl InitResultCode {
    /// Map a raw result code as returned over the C ABI.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Ok,
            1 => Self::FailedGeneric,
            2 => Self::NoSteamClient,
            3 => Self::VersionMismatch,
            other => Self::Other(other),
        }
    }

    /// The raw value the SDK uses for this code.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::FailedGeneric => 1,
            Self::NoSteamClient => 2,
            Self::VersionMismatch => 3,
            Self::Other(raw) => raw,
        }
    }

    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for InitResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => f.write_str("Ok"),
            Self::FailedGeneric => f.write_str("FailedGeneric"),
            Self::NoSteamClient => f.write_str("NoSteamClient"),
            Self::VersionMismatch => f.write_str("VersionMismatch"),
            Self::Other(raw) => write!(f, "Other({raw})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_both_ways() {
        for raw in 0..=3 {
            assert_eq!(InitResultCode::from_raw(raw).as_raw(), raw);
        }
        assert!(InitResultCode::from_raw(0).is_ok());
        assert_eq!(InitResultCode::from_raw(2), InitResultCode::NoSteamClient);
    }

    #[test]
    fn unknown_code_is_preserved() {
        let code = InitResultCode::from_raw(42);
        assert_eq!(code, InitResultCode::Other(42));
        assert!(!code.is_ok());
        assert_eq!(code.to_string(), "Other(42)");
    }
}
