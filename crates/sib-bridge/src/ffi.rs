//! C ABI for host applications.
//!
//! Function names match `include/sib_bridge.h`. Every failure collapses to
//! `false` or `0`; the one exception is the init failure message, which is
//! kept in a process-wide slot and can be read with `Steam_LastInitError`.
//!
//! All exports forward to a single static `SessionBridge` over the build's
//! default SDK backend.

use std::ffi::{c_char, c_int, c_void};

use parking_lot::Mutex;
use sib_sdk::{DefaultSdk, SteamworksSdk};

use crate::session::SessionBridge;

static BRIDGE: SessionBridge<DefaultSdk> = SessionBridge::new(sib_sdk::default_sdk());

static LAST_INIT_ERROR: Mutex<Option<String>> = parking_lot::const_mutex(None);

/// Initialize the SDK. Returns false on any non-OK result.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn Steam_Init() -> bool {
    init_flag(&BRIDGE, &LAST_INIT_ERROR)
}

/// Submit an encrypted app ticket request. True iff the SDK accepted it.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn RequestEncryptedAppTicket() -> bool {
    request_flag(&BRIDGE)
}

/// Copy the ticket into `buf`. Returns bytes written, 0 on failure.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `buf_size` bytes.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn GetEncryptedAppTicket(buf: *mut c_void, buf_size: c_int) -> c_int {
    let Some(slice) = raw_buffer(buf.cast::<u8>(), buf_size) else {
        return 0;
    };
    ticket_count(&BRIDGE, slice)
}

/// The signed-in user's SteamID64, or 0 if the user interface is absent.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn GetSteamID() -> u64 {
    steam_id_value(&BRIDGE)
}

/// Copy the last `Steam_Init` failure message into `buf`, NUL-terminated
/// and truncated to fit. Returns bytes written excluding the NUL; 0 if init
/// never failed.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `buf_size` bytes.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn Steam_LastInitError(buf: *mut c_char, buf_size: c_int) -> c_int {
    let Some(slice) = raw_buffer(buf.cast::<u8>(), buf_size) else {
        return 0;
    };
    let slot = LAST_INIT_ERROR.lock();
    match slot.as_deref() {
        Some(message) => to_c_int(copy_message(message, slice)),
        None => {
            slice[0] = 0;
            0
        }
    }
}

/// Pump the manual dispatch queue once. Returns callbacks drained.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn Steam_RunCallbacks() -> c_int {
    to_c_int(BRIDGE.pump())
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn Steam_Shutdown() {
    BRIDGE.shutdown();
}

fn init_flag<S: SteamworksSdk>(bridge: &SessionBridge<S>, slot: &Mutex<Option<String>>) -> bool {
    let result = bridge.initialize();
    let mut slot = slot.lock();
    match result {
        Ok(()) => {
            *slot = None;
            true
        }
        Err(err) => {
            *slot = Some(err.to_string());
            false
        }
    }
}

fn request_flag<S: SteamworksSdk>(bridge: &SessionBridge<S>) -> bool {
    bridge.request_encrypted_app_ticket().is_ok()
}

fn ticket_count<S: SteamworksSdk>(bridge: &SessionBridge<S>, buf: &mut [u8]) -> c_int {
    bridge
        .get_encrypted_app_ticket(buf)
        .map(to_c_int)
        .unwrap_or(0)
}

fn steam_id_value<S: SteamworksSdk>(bridge: &SessionBridge<S>) -> u64 {
    bridge.steam_id().map(u64::from).unwrap_or(0)
}

/// Null pointers and non-positive sizes yield `None`.
unsafe fn raw_buffer<'a>(ptr: *mut u8, size: c_int) -> Option<&'a mut [u8]> {
    if ptr.is_null() || size <= 0 {
        return None;
    }
    // SAFETY: caller guarantees `ptr` is writable for `size` bytes.
    Some(std::slice::from_raw_parts_mut(ptr, size as usize))
}

/// Write as much of `message` as fits, on a char boundary, plus a NUL.
fn copy_message(message: &str, buf: &mut [u8]) -> usize {
    let Some(room) = buf.len().checked_sub(1) else {
        return 0;
    };
    let mut len = message.len().min(room);
    while !message.is_char_boundary(len) {
        len -= 1;
    }
    buf[..len].copy_from_slice(&message.as_bytes()[..len]);
    buf[len] = 0;
    len
}

fn to_c_int(n: usize) -> c_int {
    c_int::try_from(n).unwrap_or(c_int::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sib_core::{ApiCallHandle, InitResultCode};
    use sib_sdk::MockSdk;

    #[test]
    fn init_flag_records_and_clears_message() {
        let slot = Mutex::new(None);
        let failing = SessionBridge::new(
            MockSdk::new().with_init_failure(InitResultCode::NoSteamClient, "Steam is not running"),
        );
        assert!(!init_flag(&failing, &slot));
        let recorded = slot.lock().clone().unwrap();
        assert!(recorded.contains("Steam is not running"));

        let sdk = MockSdk::new();
        let working = SessionBridge::new(sdk.clone());
        assert!(init_flag(&working, &slot));
        assert!(slot.lock().is_none());
        assert_eq!(sdk.calls().manual_dispatch, 1);
    }

    #[test]
    fn request_flag_follows_handle_validity() {
        let ok = SessionBridge::new(MockSdk::new());
        assert!(request_flag(&ok));
        let rejected =
            SessionBridge::new(MockSdk::new().with_request_handle(ApiCallHandle::INVALID));
        assert!(!request_flag(&rejected));
    }

    #[test]
    fn ticket_count_is_zero_on_failure_regardless_of_buffer() {
        let bridge = SessionBridge::new(MockSdk::new());
        let mut buf = [0x5A; 16];
        assert_eq!(ticket_count(&bridge, &mut buf), 0);
    }

    #[test]
    fn ticket_count_is_exact_size() {
        let bridge = SessionBridge::new(MockSdk::new().with_ticket(&[1; 12]));
        let mut buf = [0u8; 12];
        assert_eq!(ticket_count(&bridge, &mut buf), 12);
    }

    #[test]
    fn ticket_count_clamps_oversized_report() {
        let bridge = SessionBridge::new(
            MockSdk::new()
                .with_ticket(&[1; 16])
                .with_reported_size(10_000),
        );
        let mut buf = [0u8; 16];
        assert_eq!(ticket_count(&bridge, &mut buf), 16);
    }

    #[test]
    fn steam_id_value_zero_without_user() {
        let sdk = MockSdk::new().without_user();
        let bridge = SessionBridge::new(sdk.clone());
        assert_eq!(steam_id_value(&bridge), 0);
        assert_eq!(sdk.calls().steam_id_reads, 0);
    }

    #[test]
    fn copy_message_truncates_on_char_boundary() {
        let mut buf = [0xFFu8; 4];
        assert_eq!(copy_message("héllo", &mut buf), 3);
        assert_eq!(&buf, b"h\xc3\xa9\0");

        let mut buf = [0xFFu8; 3];
        assert_eq!(copy_message("héllo", &mut buf), 1);
        assert_eq!(&buf[..2], b"h\0");

        assert_eq!(copy_message("x", &mut []), 0);
    }

    #[test]
    fn null_or_empty_buffers_return_zero() {
        unsafe {
            assert_eq!(GetEncryptedAppTicket(std::ptr::null_mut(), 64), 0);
            let mut buf = [0u8; 4];
            assert_eq!(GetEncryptedAppTicket(buf.as_mut_ptr().cast(), 0), 0);
            assert_eq!(GetEncryptedAppTicket(buf.as_mut_ptr().cast(), -1), 0);
            assert_eq!(Steam_LastInitError(std::ptr::null_mut(), 64), 0);
        }
    }

    #[cfg(not(feature = "steamworks"))]
    #[test]
    fn exports_without_linked_sdk() {
        assert!(!Steam_Init());
        assert!(!RequestEncryptedAppTicket());
        assert_eq!(GetSteamID(), 0);
        assert_eq!(Steam_RunCallbacks(), 0);
        Steam_Shutdown();
        assert_eq!(Steam_RunCallbacks(), 0);
        assert_eq!(GetSteamID(), 0);

        let mut buf = [0 as c_char; 256];
        let written = unsafe { Steam_LastInitError(buf.as_mut_ptr(), buf.len() as c_int) };
        assert!(written > 0);
        let message = unsafe { std::ffi::CStr::from_ptr(buf.as_ptr()) };
        assert!(message.to_string_lossy().contains("not linked"));
    }
}
