//! # sib-bridge: Identity/Session Bridge
//!
//! Forwards four operations to the Steamworks SDK:
//!
//! - **initialize**: open the SDK session and enable manual dispatch.
//! - **request_encrypted_app_ticket**: submit an async ticket request.
//! - **get_encrypted_app_ticket**: copy the finished ticket out.
//! - **steam_id**: read the signed-in user's SteamID64.
//!
//! Two surfaces expose them:
//!
//! - [`SessionBridge`] for Rust callers, with structured errors and any
//!   [`sib_sdk::SteamworksSdk`] backend.
//! - [`ffi`] for native callers: `Steam_Init`, `RequestEncryptedAppTicket`,
//!   `GetEncryptedAppTicket`, `GetSteamID` (see `include/sib_bridge.h`).
//!
//! [`TicketPoller`] is an opt-in helper for hosts that want a blocking wait
//! on top of the two-step request/retrieve flow.
//!
//! ## Crate Policy
//!
//! - `unsafe` only in `ffi.rs`, each block with a `// SAFETY:` note.
//! - No panics across the C ABI.

pub mod ffi;
pub mod poll;
pub mod session;

pub use poll::TicketPoller;
pub use session::SessionBridge;
