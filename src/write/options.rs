//! Write options and configuration for archive creation.

use crate::codec::Codec;
use crate::crypto::Password;

/// Options controlling how an archive is written.
///
/// # Example
///
/// ```rust
/// use binarc::{Codec, WriteOptions};
///
/// let options = WriteOptions::new()
///     .codec(Codec::Rle)
///     .unit_len(4)
///     .password("hunter2")
///     .overwrite(true);
/// assert_eq!(options.effective_unit_len(), 4);
/// ```
#[derive(Clone)]
pub struct WriteOptions {
    /// Codec applied to every entry.
    pub codec: Codec,
    /// RLE window length in bytes. Ignored by Huffman.
    pub unit_len: u16,
    /// Password whose checksum is stored in the header.
    pub password: Password,
    /// Whether an existing archive at the target path may be replaced.
    pub overwrite: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            codec: Codec::Huffman,
            unit_len: 1,
            password: Password::default(),
            overwrite: false,
        }
    }
}

impl std::fmt::Debug for WriteOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteOptions")
            .field("codec", &self.codec)
            .field("unit_len", &self.unit_len)
            .field("has_password", &!self.password.is_empty())
            .field("overwrite", &self.overwrite)
            .finish()
    }
}

impl WriteOptions {
    /// Creates new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the codec.
    pub fn codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Sets the RLE unit length.
    ///
    /// The value is validated when the archive is written, against the
    /// smallest input file.
    pub fn unit_len(mut self, unit_len: u16) -> Self {
        self.unit_len = unit_len;
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<Password>) -> Self {
        self.password = password.into();
        self
    }

    /// Allows replacing an existing archive.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Returns the unit length recorded in the header.
    ///
    /// Huffman archives always record 1.
    pub fn effective_unit_len(&self) -> u16 {
        if self.codec.uses_unit_length() {
            self.unit_len
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = WriteOptions::default();
        assert_eq!(options.codec, Codec::Huffman);
        assert_eq!(options.unit_len, 1);
        assert!(options.password.is_empty());
        assert!(!options.overwrite);
    }

    #[test]
    fn test_huffman_ignores_unit_len() {
        let options = WriteOptions::new().unit_len(8);
        assert_eq!(options.effective_unit_len(), 1);
        assert_eq!(options.codec(Codec::Rle).effective_unit_len(), 8);
    }

    #[test]
    fn test_debug_hides_password() {
        let options = WriteOptions::new().password("topsecret");
        let debug = format!("{options:?}");
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("has_password: true"));
    }
}
