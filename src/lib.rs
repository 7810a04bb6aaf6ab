//! # binarc
//!
//! A self-contained, encrypted and checksummed archive format.
//!
//! Files and directories are packed into a single binary container. Every
//! entry is compressed with one of two codecs, Huffman coding or run-length
//! encoding, and the whole payload is sealed with AES-256-GCM behind a fixed
//! 81-byte header. Archives can be edited after creation: entries can be
//! added, updated and deleted without external tools.
//!
//! ## Quick Start
//!
//! ### Creating an Archive
//!
//! ```rust,no_run
//! use binarc::{Codec, Password, Result, WriteOptions};
//!
//! fn main() -> Result<()> {
//!     let options = WriteOptions::new().codec(Codec::Huffman).password("secret");
//!     let stats = binarc::compress("backup.bin", ["notes.txt"], ["photos"], options)?;
//!     println!("{stats}");
//!     Ok(())
//! }
//! ```
//!
//! ### Extracting an Archive
//!
//! ```rust,no_run
//! use binarc::{Password, Result};
//!
//! fn main() -> Result<()> {
//!     let password = Password::new("secret");
//!     for entry in binarc::list("backup.bin", Some(&password))? {
//!         println!("{} ({} bytes stored)", entry.name, entry.stored_size);
//!     }
//!     binarc::extract("backup.bin", "restored", Some(&password))?;
//!     Ok(())
//! }
//! ```
//!
//! ### Editing an Archive
//!
//! ```rust,no_run
//! use binarc::{Password, Result};
//!
//! fn main() -> Result<()> {
//!     let password = Password::new("secret");
//!     binarc::add("backup.bin", "todo.txt", Some(&password))?;
//!     binarc::update("backup.bin", "notes.txt", Some(&password))?;
//!     binarc::delete("backup.bin", "photos", Some(&password))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Archive Layout
//!
//! ```text
//! header (81 bytes, clear) | nonce (12) | ciphertext | tag (16)
//! ```
//!
//! The decrypted payload is the concatenation of the entry records. See
//! [`format`] for the field layout.
//!
//! ## Concurrency
//!
//! Operations take no locks. At most one process may write an archive at a
//! time; concurrent edits of the same archive lose all but one of them.
//! Every write goes through a temporary file that is renamed over the
//! archive, so a failed write leaves the previous archive intact.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod archive_path;
pub mod checksum;
pub mod codec;
pub mod crypto;
pub mod edit;
pub mod error;
pub mod format;
pub mod read;
pub mod stats;
pub mod write;

pub use archive_path::EntryName;
pub use codec::Codec;
pub use crypto::Password;
pub use edit::{add, delete, update};
pub use error::{Error, ErrorKind, Result};
pub use read::{Archive, Entry, EntryInfo, ExtractResult};
pub use stats::{Operation, OperationStats};
pub use write::{WriteOptions, Writer};

use std::path::Path;
use std::time::Instant;

/// Creates an archive from standalone files and directories.
///
/// Files are stored under their file names, directory members as
/// `dir/file`. See [`Writer::finish`] for the failure modes.
pub fn compress<F, D>(
    archive: impl AsRef<Path>,
    files: F,
    dirs: D,
    options: WriteOptions,
) -> Result<OperationStats>
where
    F: IntoIterator,
    F::Item: AsRef<Path>,
    D: IntoIterator,
    D::Item: AsRef<Path>,
{
    Writer::create(archive)
        .options(options)
        .files(files)
        .dirs(dirs)
        .finish()
}

/// Extracts every entry of an archive below `dest`.
///
/// `None` stands for the empty password.
pub fn extract(
    archive: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    password: Option<&Password>,
) -> Result<OperationStats> {
    let start = Instant::now();
    let opened = Archive::open(archive, password)?;
    let result = opened.extract_to(dest)?;

    let mut stats = OperationStats::new(Operation::Extract);
    stats.elapsed = start.elapsed();
    stats.input_bytes = result.bytes_extracted;
    stats.payload_bytes = opened.payload().len() as u64;
    stats.archive_bytes = std::fs::metadata(opened.path())?.len();
    stats.entries = write::entry_count(result.entries_extracted)?;
    Ok(stats)
}

/// Lists the entries of an archive after verifying it.
pub fn list(archive: impl AsRef<Path>, password: Option<&Password>) -> Result<Vec<EntryInfo>> {
    Ok(Archive::open(archive, password)?.list())
}
