//! Key derivation from a password and a per-encryption salt.
//!
//! The key is BLAKE2b-256 over `salt || password`. The salt travels with the
//! ciphertext, so the password is the only secret needed to re-derive it.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::keys::{DocumentKey, Salt, KEY_LENGTH};

/// Derive a content key from a password and salt.
///
/// # Postconditions
/// - The derived key is deterministic given the same inputs
/// - Different salts yield unrelated keys for the same password
pub fn derive_key(password: &[u8], salt: &Salt) -> DocumentKey {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(salt.as_bytes());
    hasher.update(password);

    let result = hasher.finalize();
    let mut derived = [0u8; KEY_LENGTH];
    derived.copy_from_slice(&result);
    DocumentKey::from_bytes(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_deterministic() {
        let salt = Salt::from_bytes([42u8; 16]);

        let key1 = derive_key(b"test-password-123", &salt);
        let key2 = derive_key(b"test-password-123", &salt);

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_different_salt() {
        let key1 = derive_key(b"test-password-123", &Salt::from_bytes([1u8; 16]));
        let key2 = derive_key(b"test-password-123", &Salt::from_bytes([2u8; 16]));

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_different_password() {
        let salt = Salt::from_bytes([42u8; 16]);

        let key1 = derive_key(b"password1", &salt);
        let key2 = derive_key(b"password2", &salt);

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_password_still_derives() {
        let salt = Salt::generate();
        let key = derive_key(b"", &salt);
        assert_eq!(key.as_bytes().len(), KEY_LENGTH);
    }
}
