//! One-way password verifiers.
//!
//! A verifier is the Base64 encoding of BLAKE2b-256 over the UTF-8 password.
//! It carries no salt: the same password always maps to the same verifier,
//! across every document that uses it.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use subtle::ConstantTimeEq;

/// Compute the verifier for a password.
pub fn hash_password(password: &str) -> String {
    let digest = Blake2b::<U32>::digest(password.as_bytes());
    STANDARD.encode(digest)
}

/// Check a password against a stored verifier.
///
/// The comparison runs in constant time with respect to the verifier bytes.
pub fn verify_password(password: &str, verifier: &str) -> bool {
    let computed = hash_password(password);
    computed.as_bytes().ct_eq(verifier.as_bytes()).into()
}
