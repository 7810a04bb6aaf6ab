//! Archive format constants, header records and low-level parsing utilities.
//!
//! ```text
//! ArchiveHeader (81 bytes) | sealed payload
//!
//! payload = entry record*
//!   Huffman: is_dir(1) | bitstream_len(8) | tree_len(5) | bit_len(7) |
//!            name_len(4) | name | tree | bitstream
//!   RLE:     is_dir(1) | data_len(8) | name_len(4) | name | records
//! ```
//!
//! All integers are little-endian.

pub mod entry;
pub mod header;
pub mod reader;

pub use entry::{EntryHeader, HuffmanEntryHeader, RleEntryHeader};
pub use header::ArchiveHeader;

/// Width of the password and payload checksums.
pub const CHECKSUM_SIZE: usize = 16;
/// Width of the stored encryption key.
pub const KEY_SIZE: usize = 32;
/// Width of the codec id.
pub const CODEC_ID_SIZE: usize = 1;
/// Width of the RLE unit length.
pub const UNIT_LEN_SIZE: usize = 2;
/// Width of the total payload size.
pub const PAYLOAD_SIZE_SIZE: usize = 10;
/// Width of the entry count.
pub const ENTRY_COUNT_SIZE: usize = 4;

/// Size of the archive header in bytes.
pub const ARCHIVE_HEADER_SIZE: usize = CHECKSUM_SIZE
    + KEY_SIZE
    + CHECKSUM_SIZE
    + CODEC_ID_SIZE
    + UNIT_LEN_SIZE
    + PAYLOAD_SIZE_SIZE
    + ENTRY_COUNT_SIZE;

/// Width of the directory-membership flag.
pub const IS_DIR_SIZE: usize = 1;
/// Width of a Huffman bitstream length or RLE data length.
pub const DATA_LEN_SIZE: usize = 8;
/// Width of the serialized Huffman tree length.
pub const TREE_LEN_SIZE: usize = 5;
/// Width of the unpadded Huffman bit length.
pub const BIT_LEN_SIZE: usize = 7;
/// Width of the entry name length.
pub const NAME_LEN_SIZE: usize = 4;

/// Fixed part of a Huffman entry header, before the name.
pub const HUFFMAN_ENTRY_FIXED_SIZE: usize =
    IS_DIR_SIZE + DATA_LEN_SIZE + TREE_LEN_SIZE + BIT_LEN_SIZE + NAME_LEN_SIZE;

/// Fixed part of an RLE entry header, before the name.
pub const RLE_ENTRY_FIXED_SIZE: usize = IS_DIR_SIZE + DATA_LEN_SIZE + NAME_LEN_SIZE;
