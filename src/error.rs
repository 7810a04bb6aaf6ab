//! Error types for archive operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when creating, reading or editing an archive, along with a
//! convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`. Callers
//! that only care about the broad category of a failure can use
//! [`Error::kind`]:
//!
//! ```rust,no_run
//! use binarc::{ErrorKind, Password};
//!
//! let password = Password::new("secret");
//! match binarc::extract("backup.bin", "out", Some(&password)) {
//!     Ok(stats) => println!("{stats}"),
//!     Err(e) if e.kind() == ErrorKind::WrongPassword => eprintln!("Incorrect password."),
//!     Err(e) if e.is_corruption() => eprintln!("The archive is damaged: {e}"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;
use std::path::PathBuf;

/// Broad category of an [`Error`].
///
/// Every error variant maps onto exactly one kind. Shells use the kind to
/// pick a message or a process exit code without matching on variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The archive path or an entry name is already taken.
    AlreadyExists,
    /// The requested configuration or input set is not acceptable.
    InvalidConfig,
    /// An input path or an archive entry does not exist.
    NotFound,
    /// The supplied password does not match the archive.
    WrongPassword,
    /// The archive is truncated, tampered with or otherwise damaged.
    Corruption,
    /// The archive header names a codec this crate does not know.
    InvalidArchive,
    /// An underlying I/O operation failed.
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AlreadyExists => "already exists",
            Self::InvalidConfig => "invalid configuration",
            Self::NotFound => "not found",
            Self::WrongPassword => "wrong password",
            Self::Corruption => "corruption",
            Self::InvalidArchive => "invalid archive",
            Self::Io => "I/O error",
        };
        f.write_str(name)
    }
}

fn hex(bytes: &[u8; 16]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// The error type for archive operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive file already exists and overwriting was not requested.
    #[error("Archive already exists: {}", path.display())]
    ArchiveExists {
        /// Path of the existing archive.
        path: PathBuf,
    },

    /// An entry with the same name is already stored in the archive.
    #[error("Entry already exists in archive: {path}")]
    EntryExists {
        /// Name of the duplicate entry.
        path: String,
    },

    /// The RLE unit length is zero or larger than the smallest input.
    #[error("Invalid unit length {unit_len}: {reason}")]
    InvalidUnitLength {
        /// The rejected unit length.
        unit_len: usize,
        /// Why the unit length was rejected.
        reason: String,
    },

    /// An input path exists but cannot be archived.
    ///
    /// Returned for file arguments that are not regular files and for
    /// directories that contain anything other than regular files.
    #[error("Invalid input '{}': {reason}", path.display())]
    InvalidInput {
        /// The offending input path.
        path: PathBuf,
        /// Why the input was rejected.
        reason: String,
    },

    /// A codec name is not recognised.
    #[error("Unknown codec '{0}' (expected RLE or HUF)")]
    UnknownCodec(String),

    /// An entry name cannot be stored in the archive.
    #[error("Invalid entry name: {0}")]
    InvalidEntryName(String),

    /// A value does not fit its fixed-width header field.
    #[error("Value {value} does not fit the {width}-byte field '{field}'")]
    FieldOverflow {
        /// Name of the header field.
        field: &'static str,
        /// Width of the field in bytes.
        width: usize,
        /// The value that overflowed.
        value: u128,
    },

    /// A file or directory argument does not exist.
    #[error("Input not found: {}", path.display())]
    InputNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The requested entry is not stored in the archive.
    #[error("Entry not found in archive: {path}")]
    EntryNotFound {
        /// Name that was looked up.
        path: String,
    },

    /// The password checksum does not match the one stored in the header.
    #[error("Wrong password")]
    WrongPassword,

    /// The fixed archive header is malformed or truncated.
    #[error("Corrupt header at offset {offset:#x}: {reason}")]
    CorruptHeader {
        /// Byte offset within the archive file.
        offset: u64,
        /// Description of the problem.
        reason: String,
    },

    /// The decrypted payload is malformed.
    #[error("Corrupt payload at offset {offset:#x}: {reason}")]
    CorruptPayload {
        /// Byte offset within the decrypted payload.
        offset: u64,
        /// Description of the problem.
        reason: String,
    },

    /// Authenticated decryption of the payload failed.
    ///
    /// The key stored in the header does not match the ciphertext, or the
    /// ciphertext has been modified.
    #[error("Payload decryption failed: archive key or ciphertext has been altered")]
    DecryptionFailed,

    /// The payload could not be encrypted.
    ///
    /// Only payloads beyond the cipher's message length limit trigger this.
    #[error("Payload encryption failed: payload of {size} bytes exceeds the cipher limit")]
    EncryptionFailed {
        /// Size of the plaintext payload.
        size: usize,
    },

    /// The decrypted payload does not match its stored checksum.
    #[error("Payload checksum mismatch: expected {}, got {}", hex(expected), hex(actual))]
    ChecksumMismatch {
        /// Checksum stored in the header.
        expected: [u8; 16],
        /// Checksum computed over the decrypted payload.
        actual: [u8; 16],
    },

    /// The header names an unknown codec.
    #[error("Unsupported codec id: {codec_id}")]
    UnsupportedCodec {
        /// The codec id found in the header.
        codec_id: u8,
    },
}

impl Error {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArchiveExists { .. } | Self::EntryExists { .. } => ErrorKind::AlreadyExists,
            Self::InvalidUnitLength { .. }
            | Self::InvalidInput { .. }
            | Self::UnknownCodec(_)
            | Self::InvalidEntryName(_)
            | Self::FieldOverflow { .. }
            | Self::EncryptionFailed { .. } => ErrorKind::InvalidConfig,
            Self::InputNotFound { .. } | Self::EntryNotFound { .. } => ErrorKind::NotFound,
            Self::WrongPassword => ErrorKind::WrongPassword,
            Self::CorruptHeader { .. }
            | Self::CorruptPayload { .. }
            | Self::DecryptionFailed
            | Self::ChecksumMismatch { .. } => ErrorKind::Corruption,
            Self::UnsupportedCodec { .. } => ErrorKind::InvalidArchive,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns true if this error indicates a damaged archive.
    pub fn is_corruption(&self) -> bool {
        self.kind() == ErrorKind::Corruption
    }

    /// Returns true if an input or an entry could not be found.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Creates a corrupt header error.
    pub fn corrupt_header(offset: u64, reason: impl Into<String>) -> Self {
        Self::CorruptHeader {
            offset,
            reason: reason.into(),
        }
    }

    /// Creates a corrupt payload error.
    pub fn corrupt_payload(offset: u64, reason: impl Into<String>) -> Self {
        Self::CorruptPayload {
            offset,
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_corrupt_header_display() {
        let err = Error::corrupt_header(0x40, "truncated");
        assert_eq!(err.to_string(), "Corrupt header at offset 0x40: truncated");
        assert!(err.is_corruption());
    }

    #[test]
    fn test_checksum_mismatch_display() {
        let err = Error::ChecksumMismatch {
            expected: [0xab; 16],
            actual: [0x01; 16],
        };
        let msg = err.to_string();
        assert!(msg.contains(&"ab".repeat(16)));
        assert!(msg.contains(&"01".repeat(16)));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            Error::ArchiveExists {
                path: PathBuf::from("a.bin")
            }
            .kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            Error::InvalidUnitLength {
                unit_len: 0,
                reason: "must be at least 1".into()
            }
            .kind(),
            ErrorKind::InvalidConfig
        );
        assert_eq!(
            Error::EntryNotFound {
                path: "a.txt".into()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(Error::WrongPassword.kind(), ErrorKind::WrongPassword);
        assert_eq!(Error::DecryptionFailed.kind(), ErrorKind::Corruption);
        assert_eq!(
            Error::UnsupportedCodec { codec_id: 9 }.kind(),
            ErrorKind::InvalidArchive
        );
    }

    #[test]
    fn test_not_found_predicate() {
        let err = Error::InputNotFound {
            path: PathBuf::from("/missing"),
        };
        assert!(err.is_not_found());
        assert!(!err.is_corruption());
        assert!(err.to_string().contains("/missing"));
    }

    #[test]
    fn test_field_overflow_display() {
        let err = Error::FieldOverflow {
            field: "tree_len",
            width: 5,
            value: 1 << 40,
        };
        let msg = err.to_string();
        assert!(msg.contains("tree_len"));
        assert!(msg.contains("5-byte"));
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::WrongPassword.to_string(), "wrong password");
        assert_eq!(ErrorKind::Corruption.to_string(), "corruption");
    }
}
