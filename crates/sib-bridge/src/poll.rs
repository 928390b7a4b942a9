//! # Ticket Poller
//!
//! Caller-side wait loop for a previously submitted ticket request. Each
//! attempt sleeps, pumps dispatch once, then tries a retrieval. The first
//! non-empty ticket wins.
//!
//! The poller never submits the request itself; callers still call
//! `request_encrypted_app_ticket` first.

use std::time::Duration;

use sib_core::{BridgeConfig, BridgeError, EncryptedAppTicket};
use sib_sdk::SteamworksSdk;

use crate::session::SessionBridge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketPoller {
    pub interval: Duration,
    pub attempts: u32,
    pub capacity: usize,
}

impl TicketPoller {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            attempts: config.poll_attempts,
            capacity: config.ticket_capacity,
        }
    }

    /// Wait for the ticket, giving up after `attempts` tries.
    pub fn wait_for_ticket<S: SteamworksSdk>(
        &self,
        bridge: &SessionBridge<S>,
    ) -> Result<EncryptedAppTicket, BridgeError> {
        let mut waited = Duration::ZERO;
        for attempt in 1..=self.attempts {
            if !self.interval.is_zero() {
                std::thread::sleep(self.interval);
                waited += self.interval;
            }
            bridge.pump();
            match bridge.fetch_ticket(self.capacity) {
                Ok(ticket) if !ticket.is_empty() => {
                    tracing::info!(
                        attempt,
                        waited_ms = millis(waited),
                        len = ticket.len(),
                        "encrypted app ticket ready"
                    );
                    return Ok(ticket);
                }
                Ok(_) | Err(BridgeError::TicketUnavailable { .. }) => {
                    tracing::trace!(attempt, "encrypted app ticket not ready");
                }
                Err(err) => return Err(err),
            }
        }
        Err(BridgeError::TicketTimeout {
            attempts: self.attempts,
            waited_ms: millis(waited),
        })
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl Default for TicketPoller {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sib_sdk::MockSdk;

    fn fast(attempts: u32) -> TicketPoller {
        TicketPoller {
            interval: Duration::ZERO,
            attempts,
            capacity: 64,
        }
    }

    #[test]
    fn defaults_follow_config() {
        let poller = TicketPoller::default();
        assert_eq!(poller.attempts, 100);
        assert_eq!(poller.interval, Duration::from_millis(100));
        assert_eq!(poller.capacity, 2048);
    }

    #[test]
    fn ticket_ready_after_some_frames() {
        let sdk = MockSdk::new().with_ticket_after_frames(b"late", 3);
        let bridge = SessionBridge::new(sdk.clone());

        let ticket = fast(10).wait_for_ticket(&bridge).unwrap();
        assert_eq!(ticket.as_bytes(), b"late");
        assert_eq!(sdk.calls().frames, 3);
        assert_eq!(sdk.calls().ticket_retrievals, 3);
    }

    #[test]
    fn gives_up_after_attempts() {
        let sdk = MockSdk::new();
        let bridge = SessionBridge::new(sdk.clone());

        let err = fast(4).wait_for_ticket(&bridge).unwrap_err();
        assert_eq!(
            err,
            BridgeError::TicketTimeout {
                attempts: 4,
                waited_ms: 0
            }
        );
        assert_eq!(sdk.calls().ticket_retrievals, 4);
    }

    #[test]
    fn empty_ticket_keeps_waiting() {
        let sdk = MockSdk::new().with_ticket(&[]);
        let bridge = SessionBridge::new(sdk);
        assert!(matches!(
            fast(2).wait_for_ticket(&bridge),
            Err(BridgeError::TicketTimeout { attempts: 2, .. })
        ));
    }

    #[test]
    fn missing_user_aborts_immediately() {
        let sdk = MockSdk::new().without_user();
        let bridge = SessionBridge::new(sdk.clone());
        assert_eq!(
            fast(5).wait_for_ticket(&bridge),
            Err(BridgeError::UserUnavailable)
        );
        assert_eq!(sdk.calls().frames, 1);
    }

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(250)), 250);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn sleeps_count_toward_waited_time() {
        let poller = TicketPoller {
            interval: Duration::from_millis(1),
            attempts: 2,
            capacity: 8,
        };
        let bridge = SessionBridge::new(MockSdk::new());
        assert_eq!(
            poller.wait_for_ticket(&bridge),
            Err(BridgeError::TicketTimeout {
                attempts: 2,
                waited_ms: 2
            })
        );
    }
}
