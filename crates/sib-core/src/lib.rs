//! # sib-core: Foundational Types for the Steam Identity Bridge
//!
//! Every other crate in the workspace depends on `sib-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for platform values.** `SteamId`, `AppId`, and
//!    `ApiCallHandle` wrap the raw integers the SDK hands out. A `SteamId`
//!    of zero cannot be constructed; zero only exists at the C ABI as the
//!    "unresolved" sentinel.
//!
//! 2. **Tickets are opaque.** `EncryptedAppTicket` owns the bytes and offers
//!    encoding and fingerprinting only. Nothing here inspects ticket contents.
//!
//! 3. **Errors keep their detail.** The SDK's init failure message survives
//!    as `InitError` instead of collapsing to a boolean.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sib-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod identity;
pub mod status;
pub mod ticket;

// Re-export primary types for ergonomic imports.
pub use config::BridgeConfig;
pub use error::{BridgeError, ConfigError, IdentityError, InitError};
pub use identity::{AccountType, ApiCallHandle, AppId, SteamId, Universe};
pub use status::InitResultCode;
pub use ticket::{EncryptedAppTicket, DEFAULT_TICKET_CAPACITY};
