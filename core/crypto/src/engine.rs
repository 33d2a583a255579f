//! Cipher engine seam.
//!
//! The document service depends on [`CipherEngine`] rather than on the free
//! functions directly, so the engine is passed in at construction.

use docvault_common::Result;

use crate::{aead, verifier};

/// Password-driven cipher operations used by the document service.
pub trait CipherEngine: Send + Sync {
    /// Compute the one-way verifier for a password.
    fn hash_password(&self, password: &str) -> String;

    /// Check a password against a verifier.
    fn verify_password(&self, password: &str, verifier: &str) -> bool;

    /// Encrypt plaintext under a password with fresh salt and nonce.
    fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>>;

    /// Decrypt a package produced by `encrypt`.
    fn decrypt(&self, package: &[u8], password: &str) -> Result<Vec<u8>>;
}

/// Stateless engine backed by BLAKE2b and XChaCha20-Poly1305.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordCipher;

impl PasswordCipher {
    pub fn new() -> Self {
        Self
    }
}

impl CipherEngine for PasswordCipher {
    fn hash_password(&self, password: &str) -> String {
        verifier::hash_password(password)
    }

    fn verify_password(&self, password: &str, verifier: &str) -> bool {
        verifier::verify_password(password, verifier)
    }

    fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
        aead::encrypt(plaintext, password)
    }

    fn decrypt(&self, package: &[u8], password: &str) -> Result<Vec<u8>> {
        aead::decrypt(package, password)
    }
}
