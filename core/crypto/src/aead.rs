//! Password-based authenticated encryption using XChaCha20-Poly1305.
//!
//! Every call to [`encrypt`] draws a fresh salt and a fresh nonce, so
//! encrypting the same plaintext twice under the same password never yields
//! the same package.
//!
//! Package layout: `salt (16) || nonce (24) || ciphertext || tag (16)`.

use chacha20poly1305::{
    aead::{generic_array::GenericArray, Aead, AeadCore, KeyInit, OsRng},
    XChaCha20Poly1305,
};

use crate::kdf::derive_key;
use crate::keys::{Salt, SALT_SIZE};
use docvault_common::{Error, Result};

/// Nonce size for XChaCha20-Poly1305 (24 bytes).
pub const NONCE_SIZE: usize = 24;

/// Authentication tag size (16 bytes).
pub const TAG_SIZE: usize = 16;

/// Bytes preceding the ciphertext in a package.
pub const HEADER_SIZE: usize = SALT_SIZE + NONCE_SIZE;

/// Encrypt plaintext under a password.
///
/// # Postconditions
/// - Returns salt || nonce || ciphertext || tag
/// - Salt and nonce are randomly generated per call
/// - The package length is plaintext length + HEADER_SIZE + TAG_SIZE
///
/// # Errors
/// - Returns error if encryption fails
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let salt = Salt::generate();
    let key = derive_key(password.as_bytes(), &salt);

    let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(key.as_bytes()));
    let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| Error::Crypto(format!("Encryption failed: {}", e)))?;

    let mut package = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    package.extend_from_slice(salt.as_bytes());
    package.extend_from_slice(&nonce);
    package.extend_from_slice(&ciphertext);

    Ok(package)
}

/// Decrypt a package produced by [`encrypt`].
///
/// # Errors
/// - Returns error if the package is too short to hold salt, nonce and tag
/// - Returns error if authentication fails. A wrong password and tampered
///   data are deliberately reported the same way.
pub fn decrypt(package: &[u8], password: &str) -> Result<Vec<u8>> {
    if package.len() < HEADER_SIZE + TAG_SIZE {
        return Err(Error::Crypto("Ciphertext too short".to_string()));
    }

    let (salt_bytes, rest) = package.split_at(SALT_SIZE);
    let (nonce_bytes, encrypted) = rest.split_at(NONCE_SIZE);

    let salt_array: [u8; SALT_SIZE] = salt_bytes
        .try_into()
        .map_err(|_| Error::Crypto("Malformed salt".to_string()))?;
    let key = derive_key(password.as_bytes(), &Salt::from_bytes(salt_array));

    let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(key.as_bytes()));
    let nonce = GenericArray::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, encrypted)
        .map_err(|e| Error::Crypto(format!("Decryption failed: {}", e)))
}
