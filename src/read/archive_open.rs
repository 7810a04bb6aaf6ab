//! Opening archives and verifying their envelope.

use std::fs;
use std::io;
use std::path::Path;

use crate::checksum::{Checksum, Md5};
use crate::crypto::{self, Password};
use crate::format::{ARCHIVE_HEADER_SIZE, ArchiveHeader};
use crate::{Error, Result};

use super::Archive;
use super::entries::parse_entries;

impl Archive {
    /// Opens an archive and unlocks it with `password`.
    ///
    /// `None` stands for the empty password. The checks run in a fixed
    /// order: header, password, decryption, payload size, payload checksum,
    /// entry records. Entry bodies are decoded lazily.
    ///
    /// # Errors
    ///
    /// - [`Error::InputNotFound`] if the archive does not exist
    /// - [`Error::CorruptHeader`] or [`Error::UnsupportedCodec`] if the header
    ///   cannot be parsed
    /// - [`Error::WrongPassword`] if the password checksum differs
    /// - [`Error::DecryptionFailed`], [`Error::ChecksumMismatch`] or
    ///   [`Error::CorruptPayload`] if the payload is damaged
    pub fn open(path: impl AsRef<Path>, password: Option<&Password>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::InputNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let header = ArchiveHeader::parse(&data)?;

        let empty = Password::default();
        if !password.unwrap_or(&empty).matches(&header.password_checksum) {
            return Err(Error::WrongPassword);
        }

        let payload = crypto::open(&header.key, &data[ARCHIVE_HEADER_SIZE..])?;
        if payload.len() as u64 != header.payload_size {
            return Err(Error::corrupt_payload(
                0,
                format!(
                    "payload is {} bytes, header declares {}",
                    payload.len(),
                    header.payload_size
                ),
            ));
        }

        let actual = Md5::compute(&payload);
        if actual != header.payload_checksum {
            return Err(Error::ChecksumMismatch {
                expected: header.payload_checksum,
                actual,
            });
        }

        let entries = parse_entries(header.codec, &payload, header.entry_count)?;
        log::debug!(
            "opened {}: {} entries, {} codec, payload {} bytes",
            path.display(),
            entries.len(),
            header.codec,
            payload.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            header,
            payload,
            entries,
        })
    }
}
