//! Password handling for archive access checks.

use zeroize::Zeroizing;

use crate::checksum::{Checksum, DIGEST_SIZE, Md5};

/// A password gating access to an archive.
///
/// The password is never used to derive the encryption key. The archive
/// header stores the MD5 digest of the password bytes, and every read
/// compares that digest against [`Password::checksum`]. The default
/// password is the empty string.
#[derive(Clone, Default)]
pub struct Password {
    inner: Zeroizing<String>,
}

impl Password {
    /// Creates a new password from a string.
    pub fn new<S: Into<String>>(password: S) -> Self {
        Self {
            inner: Zeroizing::new(password.into()),
        }
    }

    /// Returns the password as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the raw password bytes as they are checksummed.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Returns true if the password is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the length of the password in characters.
    pub fn len(&self) -> usize {
        self.inner.chars().count()
    }

    /// Returns the digest stored in the archive header for this password.
    pub fn checksum(&self) -> [u8; DIGEST_SIZE] {
        Md5::compute(self.as_bytes())
    }

    /// Returns true if this password produces the given stored digest.
    pub fn matches(&self, stored: &[u8; DIGEST_SIZE]) -> bool {
        self.checksum() == *stored
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't expose the actual password in debug output
        f.debug_struct("Password")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
