//! Archive reading API.
//!
//! This module provides the public API for reading archives: unlocking and
//! verifying them, listing their entries and extracting their contents.
//!
//! # Example
//!
//! ```rust,no_run
//! use binarc::{Archive, Password};
//!
//! let password = Password::new("pw");
//! let archive = Archive::open("backup.bin", Some(&password))?;
//! for entry in archive.entries() {
//!     println!("{}: {} bytes stored", entry.name(), entry.stored_size());
//! }
//! archive.extract_to("restored")?;
//! # Ok::<(), binarc::Error>(())
//! ```

mod archive_open;
mod decompression;
pub(crate) mod entries;
mod extraction;
mod info;

pub use entries::Entry;
pub use info::{EntryInfo, ExtractResult};

use std::num::NonZeroU16;
use std::path::{Path, PathBuf};

use crate::codec::Codec;
use crate::format::ArchiveHeader;

/// An unlocked archive held in memory.
///
/// The decrypted payload is kept whole; entries refer to ranges of it.
#[derive(Debug)]
pub struct Archive {
    pub(crate) path: PathBuf,
    pub(crate) header: ArchiveHeader,
    pub(crate) payload: Vec<u8>,
    pub(crate) entries: Vec<Entry>,
}

impl Archive {
    /// Returns the path the archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the parsed archive header.
    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    /// Returns the codec of the archive.
    pub fn codec(&self) -> Codec {
        self.header.codec
    }

    /// Returns the RLE unit length recorded in the header.
    pub fn unit_len(&self) -> NonZeroU16 {
        self.header.unit_len
    }

    /// Returns the entries in stored order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by its full name.
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name().as_str() == name)
    }

    /// Returns listing information for every entry.
    pub fn list(&self) -> Vec<EntryInfo> {
        self.entries
            .iter()
            .map(|entry| EntryInfo {
                name: entry.name().clone(),
                is_dir: entry.is_dir(),
                codec: self.header.codec,
                stored_size: entry.stored_size(),
            })
            .collect()
    }

    /// Returns the decrypted payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Splits the archive into its header, payload and entries.
    pub(crate) fn into_parts(self) -> (ArchiveHeader, Vec<u8>, Vec<Entry>) {
        (self.header, self.payload, self.entries)
    }
}
