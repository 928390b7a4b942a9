//! # Steamworks Flat API Backend
//!
//! Calls the `SteamAPI_*` C entry points from `steam_api_flat.h`. Interface
//! pointers are resolved fresh on every `user()` call; the SDK owns them.
//!
//! # Safety
//!
//! Every function in [`bindings`] is unsafe. The wrappers below only pass
//! pointers to live Rust buffers together with their lengths, and only
//! dereference the user interface pointer after a null check.

use std::ffi::{c_int, c_void};
use std::ptr::{self, NonNull};

use sib_core::{ApiCallHandle, InitError, InitResultCode};

use crate::traits::{SteamUser, SteamworksSdk};

/// Raw flat API declarations.
#[allow(non_camel_case_types, non_snake_case)]
pub mod bindings {
    use std::ffi::{c_char, c_int, c_void};

    /// Opaque `ISteamUser`.
    #[repr(C)]
    pub struct ISteamUser {
        _private: [u8; 0],
    }

    pub type HSteamPipe = i32;
    pub type HSteamUser = i32;
    pub type SteamAPICall_t = u64;

    /// `SteamErrMsg` is a fixed 1024-byte char buffer.
    pub type SteamErrMsg = [c_char; 1024];

    #[repr(C)]
    pub struct CallbackMsg_t {
        pub m_hSteamUser: HSteamUser,
        pub m_iCallback: c_int,
        pub m_pubParam: *mut u8,
        pub m_cubParam: c_int,
    }

    #[cfg_attr(all(windows, target_pointer_width = "64"), link(name = "steam_api64"))]
    #[cfg_attr(
        not(all(windows, target_pointer_width = "64")),
        link(name = "steam_api")
    )]
    extern "C" {
        /// Returns an `ESteamAPIInitResult`; fills `pOutErrMsg` on failure.
        pub fn SteamAPI_InitFlat(pOutErrMsg: *mut SteamErrMsg) -> c_int;

        pub fn SteamAPI_Shutdown();

        pub fn SteamAPI_ManualDispatch_Init();

        pub fn SteamAPI_GetHSteamPipe() -> HSteamPipe;

        pub fn SteamAPI_ManualDispatch_RunFrame(hSteamPipe: HSteamPipe);

        pub fn SteamAPI_ManualDispatch_GetNextCallback(
            hSteamPipe: HSteamPipe,
            pCallbackMsg: *mut CallbackMsg_t,
        ) -> bool;

        pub fn SteamAPI_ManualDispatch_FreeLastCallback(hSteamPipe: HSteamPipe);

        /// Null if the SDK is not initialized.
        pub fn SteamAPI_SteamUser_v023() -> *mut ISteamUser;

        pub fn SteamAPI_ISteamUser_RequestEncryptedAppTicket(
            self_: *mut ISteamUser,
            pDataToInclude: *mut c_void,
            cbDataToInclude: c_int,
        ) -> SteamAPICall_t;

        pub fn SteamAPI_ISteamUser_GetEncryptedAppTicket(
            self_: *mut ISteamUser,
            pTicket: *mut c_void,
            cbMaxTicket: c_int,
            pcbTicket: *mut u32,
        ) -> bool;

        pub fn SteamAPI_ISteamUser_GetSteamID(self_: *mut ISteamUser) -> u64;
    }
}

/// The linked Steamworks SDK.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatSdk;

/// Borrowed `ISteamUser*`, valid while the SDK session is.
#[derive(Debug, Clone, Copy)]
pub struct FlatUser {
    ptr: NonNull<bindings::ISteamUser>,
}

impl SteamworksSdk for FlatSdk {
    type User = FlatUser;

    fn init(&self) -> Result<(), InitError> {
        let mut msg: bindings::SteamErrMsg = [0; 1024];
        // SAFETY: `msg` is a live, correctly sized SteamErrMsg buffer.
        let raw = unsafe { bindings::SteamAPI_InitFlat(&mut msg) };
        let code = InitResultCode::from_raw(raw);
        if code.is_ok() {
            Ok(())
        } else {
            Err(InitError::new(code, err_msg_to_string(&msg)))
        }
    }

    fn enable_manual_dispatch(&self) {
        // SAFETY: takes no arguments; only called after a successful init.
        unsafe { bindings::SteamAPI_ManualDispatch_Init() }
    }

    fn user(&self) -> Option<FlatUser> {
        // SAFETY: returns null when the SDK has no user interface.
        let ptr = unsafe { bindings::SteamAPI_SteamUser_v023() };
        NonNull::new(ptr).map(|ptr| FlatUser { ptr })
    }

    fn run_frame(&self) -> usize {
        let mut drained = 0;
        // SAFETY: the pipe handle comes straight from the SDK and the
        // callback message is a local out-parameter.
        unsafe {
            let pipe = bindings::SteamAPI_GetHSteamPipe();
            bindings::SteamAPI_ManualDispatch_RunFrame(pipe);
            let mut msg = bindings::CallbackMsg_t {
                m_hSteamUser: 0,
                m_iCallback: 0,
                m_pubParam: ptr::null_mut(),
                m_cubParam: 0,
            };
            while bindings::SteamAPI_ManualDispatch_GetNextCallback(pipe, &mut msg) {
                tracing::trace!(callback = msg.m_iCallback, "drained steam callback");
                bindings::SteamAPI_ManualDispatch_FreeLastCallback(pipe);
                drained += 1;
            }
        }
        drained
    }

    fn shutdown(&self) {
        // SAFETY: no arguments; safe to call even if init failed.
        unsafe { bindings::SteamAPI_Shutdown() }
    }
}

impl SteamUser for FlatUser {
    fn request_encrypted_app_ticket(&self, data: &[u8]) -> ApiCallHandle {
        let (ptr, len) = if data.is_empty() {
            (ptr::null_mut(), 0)
        } else {
            (data.as_ptr() as *mut c_void, clamp_len(data.len()))
        };
        // SAFETY: `self.ptr` is non-null; the SDK copies `len` bytes from
        // `ptr` and does not write through it.
        let handle =
            unsafe { bindings::SteamAPI_ISteamUser_RequestEncryptedAppTicket(self.ptr.as_ptr(), ptr, len) };
        ApiCallHandle(handle)
    }

    fn get_encrypted_app_ticket(&self, buf: &mut [u8]) -> Option<usize> {
        let mut actual: u32 = 0;
        // SAFETY: `buf` is writable for `buf.len()` bytes and the capacity
        // passed never exceeds it.
        let ok = unsafe {
            bindings::SteamAPI_ISteamUser_GetEncryptedAppTicket(
                self.ptr.as_ptr(),
                buf.as_mut_ptr() as *mut c_void,
                clamp_len(buf.len()),
                &mut actual,
            )
        };
        ok.then_some(actual as usize)
    }

    fn steam_id(&self) -> u64 {
        // SAFETY: `self.ptr` is non-null.
        unsafe { bindings::SteamAPI_ISteamUser_GetSteamID(self.ptr.as_ptr()) }
    }
}

fn clamp_len(len: usize) -> c_int {
    c_int::try_from(len).unwrap_or(c_int::MAX)
}

fn err_msg_to_string(msg: &bindings::SteamErrMsg) -> String {
    let bytes: Vec<u8> = msg
        .iter()
        .map(|&c| c as u8)
        .take_while(|&b| b != 0)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn err_msg_stops_at_nul() {
        let mut msg: bindings::SteamErrMsg = [0; 1024];
        for (slot, byte) in msg.iter_mut().zip(b"No Steam client") {
            *slot = *byte as _;
        }
        assert_eq!(err_msg_to_string(&msg), "No Steam client");
    }

    #[test]
    fn oversized_lengths_clamp() {
        assert_eq!(clamp_len(16), 16);
        assert_eq!(clamp_len(usize::MAX), c_int::MAX);
    }
}
