//! Backend for builds without the vendor library.

use sib_core::{ApiCallHandle, InitError, InitResultCode};

use crate::traits::{SteamUser, SteamworksSdk};

const NOT_LINKED: &str =
    "Steamworks SDK is not linked into this build (rebuild with the `steamworks` feature)";

/// Every call fails the way an SDK without a running client would.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSdk;

/// Uninhabited: `UnavailableSdk` never resolves a user.
#[derive(Debug)]
pub enum NoUser {}

impl SteamUser for NoUser {
    fn request_encrypted_app_ticket(&self, _data: &[u8]) -> ApiCallHandle {
        match *self {}
    }

    fn get_encrypted_app_ticket(&self, _buf: &mut [u8]) -> Option<usize> {
        match *self {}
    }

    fn steam_id(&self) -> u64 {
        match *self {}
    }
}

impl SteamworksSdk for UnavailableSdk {
    type User = NoUser;

    fn init(&self) -> Result<(), InitError> {
        Err(InitError::new(InitResultCode::FailedGeneric, NOT_LINKED))
    }

    fn enable_manual_dispatch(&self) {}

    fn user(&self) -> Option<NoUser> {
        None
    }

    fn run_frame(&self) -> usize {
        0
    }

    fn shutdown(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_fails_with_explanation() {
        let err = UnavailableSdk.init().unwrap_err();
        assert_eq!(err.code, InitResultCode::FailedGeneric);
        assert!(err.message.contains("steamworks"));
    }

    #[test]
    fn no_user_and_nothing_to_pump() {
        assert!(UnavailableSdk.user().is_none());
        assert_eq!(UnavailableSdk.run_frame(), 0);
    }
}
