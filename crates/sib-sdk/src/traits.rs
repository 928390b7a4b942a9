//! # SDK Capability Traits
//!
//! The SDK's real state machine (uninitialized → initialized →
//! ticket-requested → ticket-ready) lives behind these calls. Implementations
//! do not track it; callers sequence calls.

use sib_core::{ApiCallHandle, InitError};

/// The current user's interface, as resolved from a live session.
pub trait SteamUser {
    /// Start an asynchronous encrypted app ticket request.
    ///
    /// `data` is extra application data to embed; empty means none.
    /// Returns [`ApiCallHandle::INVALID`] if the SDK refused the request.
    fn request_encrypted_app_ticket(&self, data: &[u8]) -> ApiCallHandle;

    /// Copy the most recent ticket into `buf`.
    ///
    /// Returns the SDK-reported ticket size, or `None` if the SDK reported
    /// failure (no ticket yet, buffer too small).
    fn get_encrypted_app_ticket(&self, buf: &mut [u8]) -> Option<usize>;

    /// The signed-in user's SteamID64, verbatim.
    fn steam_id(&self) -> u64;
}

/// Session-level SDK entry points.
pub trait SteamworksSdk {
    type User: SteamUser;

    /// Initialize the SDK. On failure the SDK's error message is kept.
    fn init(&self) -> Result<(), InitError>;

    /// Switch callback delivery to manual dispatch. Only valid after `init`.
    fn enable_manual_dispatch(&self);

    /// Resolve the current user interface, if the SDK has one.
    fn user(&self) -> Option<Self::User>;

    /// Pump the manual dispatch queue once. Returns callbacks drained.
    fn run_frame(&self) -> usize;

    fn shutdown(&self);
}
