//! # sib-sdk: Steamworks SDK Capability
//!
//! Wraps the vendor SDK's opaque handles and interface pointers behind
//! traits, so the bridge can be exercised without linking the SDK.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): `SteamworksSdk` covers session-level entry
//!   points; `SteamUser` covers the user interface the SDK hands back once a
//!   session exists.
//!
//! - **Mock** (`mock.rs`, `mock` feature): `MockSdk` is scriptable and counts
//!   every call, so tests can assert which SDK entry points were reached.
//!
//! - **Unavailable** (`unavailable.rs`): `UnavailableSdk` is the backend for
//!   builds that do not link the vendor library. Init always fails with a
//!   message saying so.
//!
//! - **Flat** (`flat.rs`, `steamworks` feature): `FlatSdk` calls the
//!   `SteamAPI_*` flat C API exported by `steam_api`/`steam_api64`.
//!
//! `DefaultSdk` resolves to `FlatSdk` when `steamworks` is enabled and to
//! `UnavailableSdk` otherwise.

#[cfg(feature = "steamworks")]
pub mod flat;
#[cfg(feature = "mock")]
pub mod mock;
pub mod traits;
pub mod unavailable;

#[cfg(feature = "steamworks")]
pub use flat::FlatSdk;
#[cfg(feature = "mock")]
pub use mock::{MockCalls, MockSdk};
pub use traits::{SteamUser, SteamworksSdk};
pub use unavailable::UnavailableSdk;

/// Backend the C ABI and CLI use in this build.
#[cfg(feature = "steamworks")]
pub type DefaultSdk = FlatSdk;
/// Backend the C ABI and CLI use in this build.
#[cfg(not(feature = "steamworks"))]
pub type DefaultSdk = UnavailableSdk;

/// Construct the build's default backend.
#[cfg(feature = "steamworks")]
pub const fn default_sdk() -> DefaultSdk {
    FlatSdk
}

/// Construct the build's default backend.
#[cfg(not(feature = "steamworks"))]
pub const fn default_sdk() -> DefaultSdk {
    UnavailableSdk
}
