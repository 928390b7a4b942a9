//! # Encrypted App Ticket
//!
//! An opaque, platform-issued credential blob. The bridge copies it out of
//! the SDK and hands it to the caller; it is never parsed here.
//!
//! Logging must go through [`EncryptedAppTicket::sha256_hex`] rather than the
//! bytes themselves.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Buffer size used when the caller does not pick one.
pub const DEFAULT_TICKET_CAPACITY: usize = 2048;

/// Ticket bytes as returned by the SDK.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedAppTicket {
    bytes: Vec<u8>,
}

impl EncryptedAppTicket {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Standard-alphabet, padded Base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Lowercase hex SHA-256 of the ticket bytes.
    pub fn sha256_hex(&self) -> String {
        let digest = Sha256::digest(&self.bytes);
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

// Redacted: tickets are credentials.
impl std::fmt::Debug for EncryptedAppTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedAppTicket")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_uses_standard_padded_alphabet() {
        let ticket = EncryptedAppTicket::from_bytes(vec![0xfb, 0xff, 0x01]);
        assert_eq!(ticket.to_base64(), "+/8B");
        let ticket = EncryptedAppTicket::from_bytes(b"ab".to_vec());
        assert_eq!(ticket.to_base64(), "YWI=");
    }

    #[test]
    fn sha256_of_empty_ticket() {
        let ticket = EncryptedAppTicket::from_bytes(Vec::new());
        assert!(ticket.is_empty());
        assert_eq!(
            ticket.sha256_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn debug_does_not_leak_bytes() {
        let ticket = EncryptedAppTicket::from_bytes(vec![0x41; 16]);
        let rendered = format!("{ticket:?}");
        assert!(rendered.contains("len: 16"));
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("65"));
    }
}
