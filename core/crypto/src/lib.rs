//! Cryptographic primitives for DocVault.
//!
//! This module provides:
//! - One-way password verifiers (BLAKE2b-256, Base64)
//! - Per-encryption key derivation from a random salt and the password
//! - Authenticated encryption using XChaCha20-Poly1305
//! - The `CipherEngine` seam used by the document service
//!
//! # Security Guarantees
//! - Derived keys are zeroized on drop
//! - No plaintext, password or key material is ever logged
//! - Verifier comparison is constant-time

pub mod aead;
pub mod engine;
pub mod kdf;
pub mod keys;
pub mod verifier;

pub use aead::{decrypt, encrypt};
pub use engine::{CipherEngine, PasswordCipher};
pub use kdf::derive_key;
pub use keys::{DocumentKey, Salt};
pub use verifier::{hash_password, verify_password};
