//! # Mock SDK
//!
//! A scriptable stand-in for the vendor SDK. Behavior is configured with
//! builder methods and can be changed mid-test; every entry point bumps a
//! counter readable through [`MockSdk::calls`].
//!
//! Clones share state, so a test can keep one handle while the bridge owns
//! another.
//!
//! Ticket retrieval mimics the SDK: it fails until the configured number of
//! `run_frame` calls has happened, and it fails when the ticket does not fit
//! the caller's buffer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sib_core::{ApiCallHandle, InitError, InitResultCode};

use crate::traits::{SteamUser, SteamworksSdk};

/// How many times each SDK entry point was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub init: u32,
    pub manual_dispatch: u32,
    pub user_lookups: u32,
    pub ticket_requests: u32,
    pub ticket_retrievals: u32,
    pub steam_id_reads: u32,
    pub frames: u32,
    pub shutdowns: u32,
}

#[derive(Debug)]
struct Behavior {
    init: Result<(), InitError>,
    user_present: bool,
    request_handle: ApiCallHandle,
    ticket: Option<Vec<u8>>,
    ready_after_frames: u32,
    steam_id: u64,
    pending_callbacks: usize,
    reported_size: Option<usize>,
}

#[derive(Debug)]
struct MockState {
    behavior: RefCell<Behavior>,
    calls: Cell<MockCalls>,
    last_request_data: RefCell<Option<Vec<u8>>>,
}

impl MockState {
    fn bump(&self, f: impl FnOnce(&mut MockCalls)) {
        let mut calls = self.calls.get();
        f(&mut calls);
        self.calls.set(calls);
    }
}

/// Scriptable SDK double.
#[derive(Debug, Clone)]
pub struct MockSdk {
    state: Rc<MockState>,
}

/// User interface handed out by [`MockSdk::user`].
#[derive(Debug, Clone)]
pub struct MockUser {
    state: Rc<MockState>,
}

impl Default for MockSdk {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSdk {
    /// Init succeeds, a user is signed in, requests are accepted with
    /// handle 1, and no ticket is available.
    pub fn new() -> Self {
        Self {
            state: Rc::new(MockState {
                behavior: RefCell::new(Behavior {
                    init: Ok(()),
                    user_present: true,
                    request_handle: ApiCallHandle(1),
                    ticket: None,
                    ready_after_frames: 0,
                    steam_id: 76_561_197_960_287_930,
                    pending_callbacks: 0,
                    reported_size: None,
                }),
                calls: Cell::new(MockCalls::default()),
                last_request_data: RefCell::new(None),
            }),
        }
    }

    pub fn with_init_failure(self, code: InitResultCode, message: &str) -> Self {
        self.state.behavior.borrow_mut().init = Err(InitError::new(code, message));
        self
    }

    pub fn without_user(self) -> Self {
        self.state.behavior.borrow_mut().user_present = false;
        self
    }

    pub fn with_request_handle(self, handle: ApiCallHandle) -> Self {
        self.state.behavior.borrow_mut().request_handle = handle;
        self
    }

    pub fn with_ticket(self, bytes: &[u8]) -> Self {
        self.set_ticket(Some(bytes.to_vec()));
        self
    }

    /// Ticket becomes retrievable only after `frames` calls to `run_frame`.
    pub fn with_ticket_after_frames(self, bytes: &[u8], frames: u32) -> Self {
        {
            let mut behavior = self.state.behavior.borrow_mut();
            behavior.ticket = Some(bytes.to_vec());
            behavior.ready_after_frames = frames;
        }
        self
    }

    pub fn with_steam_id(self, raw: u64) -> Self {
        self.state.behavior.borrow_mut().steam_id = raw;
        self
    }

    /// Callbacks reported as drained by the next `run_frame`.
    pub fn with_pending_callbacks(self, count: usize) -> Self {
        self.state.behavior.borrow_mut().pending_callbacks = count;
        self
    }

    /// Report `size` as the ticket size on success, whatever the buffer
    /// holds. Only the bytes that fit are copied.
    pub fn with_reported_size(self, size: usize) -> Self {
        self.state.behavior.borrow_mut().reported_size = Some(size);
        self
    }

    /// Replace the ticket on a live mock.
    pub fn set_ticket(&self, bytes: Option<Vec<u8>>) {
        self.state.behavior.borrow_mut().ticket = bytes;
    }

    pub fn calls(&self) -> MockCalls {
        self.state.calls.get()
    }

    /// Application data passed with the most recent ticket request.
    pub fn last_request_data(&self) -> Option<Vec<u8>> {
        self.state.last_request_data.borrow().clone()
    }
}

impl SteamworksSdk for MockSdk {
    type User = MockUser;

    fn init(&self) -> Result<(), InitError> {
        self.state.bump(|c| c.init += 1);
        self.state.behavior.borrow().init.clone()
    }

    fn enable_manual_dispatch(&self) {
        self.state.bump(|c| c.manual_dispatch += 1);
    }

    fn user(&self) -> Option<MockUser> {
        self.state.bump(|c| c.user_lookups += 1);
        if self.state.behavior.borrow().user_present {
            Some(MockUser {
                state: Rc::clone(&self.state),
            })
        } else {
            None
        }
    }

    fn run_frame(&self) -> usize {
        self.state.bump(|c| c.frames += 1);
        std::mem::take(&mut self.state.behavior.borrow_mut().pending_callbacks)
    }

    fn shutdown(&self) {
        self.state.bump(|c| c.shutdowns += 1);
    }
}

impl SteamUser for MockUser {
    fn request_encrypted_app_ticket(&self, data: &[u8]) -> ApiCallHandle {
        self.state.bump(|c| c.ticket_requests += 1);
        *self.state.last_request_data.borrow_mut() = Some(data.to_vec());
        self.state.behavior.borrow().request_handle
    }

    fn get_encrypted_app_ticket(&self, buf: &mut [u8]) -> Option<usize> {
        self.state.bump(|c| c.ticket_retrievals += 1);
        let frames = self.state.calls.get().frames;
        let behavior = self.state.behavior.borrow();
        if frames < behavior.ready_after_frames {
            return None;
        }
        let ticket = behavior.ticket.as_ref()?;
        if let Some(size) = behavior.reported_size {
            let fits = ticket.len().min(buf.len());
            buf[..fits].copy_from_slice(&ticket[..fits]);
            return Some(size);
        }
        if ticket.len() > buf.len() {
            return None;
        }
        buf[..ticket.len()].copy_from_slice(ticket);
        Some(ticket.len())
    }

    fn steam_id(&self) -> u64 {
        self.state.bump(|c| c.steam_id_reads += 1);
        self.state.behavior.borrow().steam_id
    }
}
