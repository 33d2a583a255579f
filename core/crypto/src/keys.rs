//! Key types with secure memory handling.

use chacha20poly1305::aead::{rand_core::RngCore, OsRng};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of encryption keys in bytes (256-bit).
pub const KEY_LENGTH: usize = 32;

/// Length of the per-encryption salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Content key derived from a document password and a salt.
///
/// Never persisted: it is re-derived for every encrypt/decrypt call and
/// zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DocumentKey {
    key: [u8; KEY_LENGTH],
}

impl DocumentKey {
    /// Create a document key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Get the key bytes.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentKey([REDACTED])")
    }
}

/// Random salt mixed into key derivation.
///
/// Stored in clear at the front of every encrypted package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Generate a random salt.
    pub fn generate() -> Self {
        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);
        Self(salt)
    }

    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}
