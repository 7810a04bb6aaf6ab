//! Archive writing API.
//!
//! This module provides the public API for creating archives from standalone
//! files and directories.
//!
//! # Example
//!
//! ```rust,no_run
//! use binarc::{Codec, WriteOptions, Writer};
//!
//! let stats = Writer::create("backup.bin")
//!     .options(WriteOptions::new().codec(Codec::Rle).unit_len(2).password("pw"))
//!     .file("notes.txt")
//!     .dir("photos")
//!     .finish()?;
//! println!("{stats}");
//! # Ok::<(), binarc::Error>(())
//! ```
//!
//! Standalone files are stored first, in the order given, followed by the
//! members of each directory. Every entry is validated before anything is
//! written, and the archive file only appears once it is complete.

mod commit;
mod entry_compression;
mod entry_input;
pub(crate) mod options;

pub use entry_input::{EntryInput, check_unique_names, check_unit_len};
pub use options::WriteOptions;

pub(crate) use commit::commit;

use std::num::NonZeroU16;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::codec::Codec;
use crate::crypto::ArchiveKey;
use crate::format::ArchiveHeader;
use crate::format::ENTRY_COUNT_SIZE;
use crate::stats::{Operation, OperationStats};
use crate::{Error, Result};

/// Builder for a new archive.
///
/// Inputs are only recorded by the builder methods; all validation and I/O
/// happen in [`Writer::finish`].
#[derive(Debug)]
pub struct Writer {
    path: PathBuf,
    options: WriteOptions,
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

impl Writer {
    /// Starts a new archive at `path` with default options.
    pub fn create(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: WriteOptions::default(),
            files: Vec::new(),
            dirs: Vec::new(),
        }
    }

    /// Replaces the write options.
    pub fn options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds a standalone file.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds several standalone files.
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.files
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Adds a directory whose regular files are stored as `dir/file`.
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.dirs.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds several directories.
    pub fn dirs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.dirs
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Validates the inputs, encodes them and writes the archive.
    ///
    /// Archives are written by a single process at a time; concurrent writers
    /// to the same path are not coordinated.
    ///
    /// # Errors
    ///
    /// - [`Error::ArchiveExists`] if the archive exists and overwriting is off
    /// - [`Error::InputNotFound`] if a file or directory is missing
    /// - [`Error::InvalidInput`] if an input cannot be archived
    /// - [`Error::InvalidUnitLength`] if the RLE unit length is unusable
    /// - [`Error::EntryExists`] if two inputs map to the same entry name
    pub fn finish(self) -> Result<OperationStats> {
        let start = Instant::now();
        if !self.options.overwrite && self.path.exists() {
            return Err(Error::ArchiveExists { path: self.path });
        }

        let mut inputs = self
            .files
            .iter()
            .map(EntryInput::file)
            .collect::<Result<Vec<_>>>()?;
        for dir in &self.dirs {
            inputs.extend(EntryInput::dir_members(dir)?);
        }

        let unit_len = prepare_unit_len(self.options.codec, &inputs, &self.options)?;
        check_unique_names(inputs.iter().map(|input| &input.name))?;

        let mut payload = Vec::new();
        let input_bytes = encode_inputs(self.options.codec, unit_len, &inputs, &mut payload)?;

        let header = ArchiveHeader {
            password_checksum: self.options.password.checksum(),
            key: ArchiveKey::generate(),
            payload_checksum: [0; 16],
            codec: self.options.codec,
            unit_len,
            payload_size: 0,
            entry_count: entry_count(inputs.len())?,
        };
        let entries = header.entry_count;
        let archive_bytes = commit(&self.path, header, &payload, self.options.overwrite)?;

        log::debug!(
            "compressed {} entries into {} with {}",
            entries,
            self.path.display(),
            self.options.codec
        );
        Ok(OperationStats {
            operation: Operation::Compress,
            elapsed: start.elapsed(),
            input_bytes,
            payload_bytes: payload.len() as u64,
            archive_bytes,
            archive_bytes_before: 0,
            entries,
        })
    }
}

/// Resolves the unit length stored in the header, validating it for RLE.
pub(crate) fn prepare_unit_len(
    codec: Codec,
    inputs: &[EntryInput],
    options: &WriteOptions,
) -> Result<NonZeroU16> {
    if codec.uses_unit_length() {
        check_unit_len(inputs, options.unit_len)
    } else {
        Ok(NonZeroU16::MIN)
    }
}

/// Encodes every input into `payload`, returning the number of source bytes.
pub(crate) fn encode_inputs(
    codec: Codec,
    unit_len: NonZeroU16,
    inputs: &[EntryInput],
    payload: &mut Vec<u8>,
) -> Result<u64> {
    let mut total = 0u64;
    for input in inputs {
        let data = input.read()?;
        total += data.len() as u64;
        entry_compression::compress_entry(codec, unit_len, &input.name, &data, payload)?;
    }
    Ok(total)
}

/// Converts an entry total into the header's entry count.
pub(crate) fn entry_count(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| Error::FieldOverflow {
        field: "entry_count",
        width: ENTRY_COUNT_SIZE,
        value: count as u128,
    })
}
