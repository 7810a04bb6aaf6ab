//! Payload encryption for archives.
//!
//! Every archive carries a random 256-bit key in its header. The payload
//! region that follows the header is sealed with AES-256-GCM under that key:
//!
//! ```text
//! nonce(12) | ciphertext(payload_len) | tag(16)
//! ```
//!
//! The password is not involved here. It only gates access through the
//! checksum comparison performed by the reader, so anyone holding the archive
//! file also holds its key. Authentication failures surface as
//! [`Error::DecryptionFailed`] independently of the payload checksum.

mod password;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::{Error, Result};

pub use password::Password;

/// Length of the archive key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the nonce prepended to the sealed payload.
pub const NONCE_LEN: usize = 12;

/// Length of the authentication tag appended by AES-GCM.
pub const TAG_LEN: usize = 16;

/// Bytes added to a payload by [`seal`].
pub const SEAL_OVERHEAD: usize = NONCE_LEN + TAG_LEN;

/// The symmetric key stored in the archive header.
///
/// Fresh keys are generated when an archive is created. Add keeps the key of
/// the archive it edits; delete and update rebuild the archive and therefore
/// get a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct ArchiveKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
}

impl ArchiveKey {
    /// Generates a new random key.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        rand::thread_rng().fill_bytes(&mut bytes[..]);
        Self { bytes }
    }

    /// Wraps raw key bytes read from an archive header.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.bytes[..]))
    }
}

impl std::fmt::Debug for ArchiveKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveKey").finish_non_exhaustive()
    }
}

/// Encrypts a payload under `key` with a fresh random nonce.
///
/// # Errors
///
/// Returns [`Error::EncryptionFailed`] if the payload exceeds the AES-GCM
/// message size limit.
pub fn seal(key: &ArchiveKey, payload: &[u8]) -> Result<Vec<u8>> {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = key
        .cipher()
        .encrypt(Nonce::from_slice(&nonce), payload)
        .map_err(|_| Error::EncryptionFailed {
            size: payload.len(),
        })?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypts a payload produced by [`seal`].
///
/// # Errors
///
/// Returns [`Error::DecryptionFailed`] if the region is too short to hold a
/// nonce and tag, or if authentication fails.
pub fn open(key: &ArchiveKey, sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < SEAL_OVERHEAD {
        return Err(Error::DecryptionFailed);
    }
    let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
    key.cipher()
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::DecryptionFailed)
}
