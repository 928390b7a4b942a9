//! # Session Bridge
//!
//! The four bridge operations with structured errors. Each one forwards to
//! a single SDK entry point; none of them retries, waits, or pumps
//! callbacks.
//!
//! Sequencing is the caller's job: `initialize` first, then
//! `request_encrypted_app_ticket`, then drive dispatch (see
//! [`SessionBridge::pump`]) until `get_encrypted_app_ticket` succeeds.
//! `steam_id` is valid any time after `initialize`.

use sib_core::{ApiCallHandle, BridgeError, EncryptedAppTicket, InitError, SteamId};
use sib_sdk::{SteamUser, SteamworksSdk};

/// Forwards bridge operations to an SDK backend.
#[derive(Debug)]
pub struct SessionBridge<S> {
    sdk: S,
}

impl<S> SessionBridge<S> {
    pub const fn new(sdk: S) -> Self {
        Self { sdk }
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    pub fn into_inner(self) -> S {
        self.sdk
    }
}

impl<S: SteamworksSdk> SessionBridge<S> {
    /// Initialize the SDK and switch it to manual dispatch.
    ///
    /// On failure no further SDK call is made and the SDK must not be used
    /// for the rest of the process.
    pub fn initialize(&self) -> Result<(), InitError> {
        if let Err(err) = self.sdk.init() {
            tracing::warn!(
                code = %err.code,
                message = %err.message,
                "steam api initialization failed"
            );
            return Err(err);
        }
        self.sdk.enable_manual_dispatch();
        tracing::info!("steam api initialized with manual dispatch");
        Ok(())
    }

    /// Submit an asynchronous encrypted app ticket request with no extra
    /// application data.
    ///
    /// Success means the SDK accepted the request, not that a ticket exists.
    pub fn request_encrypted_app_ticket(&self) -> Result<ApiCallHandle, BridgeError> {
        let user = self.user()?;
        let handle = user.request_encrypted_app_ticket(&[]);
        if !handle.is_valid() {
            tracing::warn!("encrypted app ticket request rejected");
            return Err(BridgeError::TicketRequestRejected);
        }
        tracing::debug!(handle = handle.0, "encrypted app ticket requested");
        Ok(handle)
    }

    /// Copy the ticket into `buf`, returning the number of bytes written.
    pub fn get_encrypted_app_ticket(&self, buf: &mut [u8]) -> Result<usize, BridgeError> {
        let capacity = buf.len();
        let user = self.user()?;
        match user.get_encrypted_app_ticket(buf) {
            Some(size) => Ok(size.min(capacity)),
            None => Err(BridgeError::TicketUnavailable { capacity }),
        }
    }

    /// Retrieve the ticket into a fresh buffer of `capacity` bytes.
    pub fn fetch_ticket(&self, capacity: usize) -> Result<EncryptedAppTicket, BridgeError> {
        let mut buf = vec![0u8; capacity];
        let size = self.get_encrypted_app_ticket(&mut buf)?;
        buf.truncate(size);
        let ticket = EncryptedAppTicket::from_bytes(buf);
        tracing::debug!(
            len = ticket.len(),
            sha256 = %ticket.sha256_hex(),
            "encrypted app ticket retrieved"
        );
        Ok(ticket)
    }

    /// The signed-in user's SteamID.
    ///
    /// The identifier accessor is only called once the user interface has
    /// resolved.
    pub fn steam_id(&self) -> Result<SteamId, BridgeError> {
        let user = self.user()?;
        SteamId::new(user.steam_id()).ok_or(BridgeError::UserUnavailable)
    }

    /// Pump the SDK's manual dispatch queue once.
    pub fn pump(&self) -> usize {
        let drained = self.sdk.run_frame();
        if drained > 0 {
            tracing::trace!(drained, "pumped steam callbacks");
        }
        drained
    }

    pub fn shutdown(&self) {
        self.sdk.shutdown();
        tracing::debug!("steam api shut down");
    }

    fn user(&self) -> Result<S::User, BridgeError> {
        self.sdk.user().ok_or(BridgeError::UserUnavailable)
    }
}
