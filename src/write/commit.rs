//! Sealing a payload and writing the archive file.
//!
//! The archive is first written to a temporary file next to the target and
//! then renamed into place, so a failed write never leaves a partial archive
//! behind and never damages the archive being replaced.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::checksum::{Checksum, Md5};
use crate::crypto;
use crate::format::ArchiveHeader;
use crate::{Error, Result};

/// Finalizes `header` for `payload`, seals the payload and writes the
/// archive to `path`.
///
/// Returns the size of the written archive file.
///
/// # Errors
///
/// - [`Error::ArchiveExists`] if `path` exists and `overwrite` is false
/// - [`Error::Io`] if the temporary file cannot be written or renamed
pub(crate) fn commit(
    path: &Path,
    mut header: ArchiveHeader,
    payload: &[u8],
    overwrite: bool,
) -> Result<u64> {
    header.payload_checksum = Md5::compute(payload);
    header.payload_size = payload.len() as u64;
    let sealed = crypto::seal(&header.key, payload)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&header.to_bytes())?;
    file.write_all(&sealed)?;
    file.as_file().sync_all()?;

    let size = file.as_file().metadata()?.len();
    let persisted = if overwrite {
        file.persist(path)
    } else {
        file.persist_noclobber(path)
    };
    persisted.map_err(|e| {
        if e.error.kind() == io::ErrorKind::AlreadyExists {
            Error::ArchiveExists {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e.error)
        }
    })?;

    log::debug!(
        "wrote {} ({size} bytes, {} entries, payload {} bytes)",
        path.display(),
        header.entry_count,
        header.payload_size
    );
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::crypto::ArchiveKey;
    use crate::format::ARCHIVE_HEADER_SIZE;
    use std::num::NonZeroU16;
    use tempfile::TempDir;

    fn header() -> ArchiveHeader {
        ArchiveHeader {
            password_checksum: [0; 16],
            key: ArchiveKey::generate(),
            payload_checksum: [0; 16],
            codec: Codec::Huffman,
            unit_len: NonZeroU16::MIN,
            payload_size: 0,
            entry_count: 0,
        }
    }

    #[test]
    fn test_commit_writes_header_and_sealed_payload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.bin");
        let h = header();
        let size = commit(&path, h.clone(), b"payload", false).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len() as u64, size);
        let parsed = ArchiveHeader::parse(&bytes).unwrap();
        assert_eq!(parsed.payload_size, 7);
        assert_eq!(parsed.payload_checksum, Md5::compute(b"payload"));
        let opened = crypto::open(&parsed.key, &bytes[ARCHIVE_HEADER_SIZE..]).unwrap();
        assert_eq!(opened, b"payload");
    }

    #[test]
    fn test_commit_refuses_existing_without_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.bin");
        std::fs::write(&path, b"old").unwrap();

        let err = commit(&path, header(), b"new", false).unwrap_err();
        assert!(matches!(err, Error::ArchiveExists { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), b"old");

        commit(&path, header(), b"new", true).unwrap();
        assert_ne!(std::fs::read(&path).unwrap(), b"old");
    }

    #[test]
    fn test_commit_leaves_no_temporary_files() {
        let temp = TempDir::new().unwrap();
        commit(&temp.path().join("a.bin"), header(), b"", false).unwrap();
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
