//! Archive information types.

use crate::EntryName;
use crate::codec::Codec;

/// Summary of one stored entry, as shown by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name.
    pub name: EntryName,
    /// Whether the entry belongs to a compressed directory.
    pub is_dir: bool,
    /// Codec the entry was encoded with.
    pub codec: Codec,
    /// Size of the stored record, header included.
    pub stored_size: u64,
}

/// Result of extracting an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractResult {
    /// Number of entries extracted.
    pub entries_extracted: usize,
    /// Total bytes written.
    pub bytes_extracted: u64,
}
