//! The fixed archive header.

use std::num::NonZeroU16;

use crate::checksum::DIGEST_SIZE;
use crate::codec::Codec;
use crate::crypto::{ArchiveKey, KEY_LEN};
use crate::{Error, Result};

use super::reader::ByteReader;
use super::{ARCHIVE_HEADER_SIZE, ENTRY_COUNT_SIZE, PAYLOAD_SIZE_SIZE, UNIT_LEN_SIZE};

/// The header at the start of every archive.
///
/// ```text
/// password_checksum(16) | key(32) | payload_checksum(16) |
/// codec_id(1) | unit_len(2) | payload_size(10) | entry_count(4)
/// ```
///
/// `payload_size` is the exact length of the decrypted payload and
/// `entry_count` the number of entry records it holds. Readers reject an
/// archive whose payload disagrees with either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHeader {
    /// Digest of the password, compared on every read.
    pub password_checksum: [u8; DIGEST_SIZE],
    /// Key the payload is sealed with, stored in the clear.
    pub key: ArchiveKey,
    /// Digest of the decrypted payload.
    pub payload_checksum: [u8; DIGEST_SIZE],
    /// Codec used for every entry.
    pub codec: Codec,
    /// RLE unit length; always 1 for Huffman archives.
    pub unit_len: NonZeroU16,
    /// Length of the decrypted payload in bytes.
    pub payload_size: u64,
    /// Number of entry records in the payload.
    pub entry_count: u32,
}

impl ArchiveHeader {
    /// Encodes the header into its fixed 81-byte layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(ARCHIVE_HEADER_SIZE);
        buf.extend_from_slice(&self.password_checksum);
        buf.extend_from_slice(self.key.as_bytes());
        buf.extend_from_slice(&self.payload_checksum);
        buf.push(self.codec.id());
        buf.extend_from_slice(&self.unit_len.get().to_le_bytes());
        buf.extend_from_slice(&u128::from(self.payload_size).to_le_bytes()[..PAYLOAD_SIZE_SIZE]);
        buf.extend_from_slice(&self.entry_count.to_le_bytes());
        debug_assert_eq!(buf.len(), ARCHIVE_HEADER_SIZE);
        buf
    }

    /// Parses the header from the start of `data`.
    ///
    /// # Errors
    ///
    /// - [`Error::CorruptHeader`] if `data` is shorter than the header, the
    ///   unit length is zero or the payload size exceeds 64 bits
    /// - [`Error::UnsupportedCodec`] if the codec id is unknown
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < ARCHIVE_HEADER_SIZE {
            return Err(Error::corrupt_header(
                data.len() as u64,
                format!(
                    "archive is {} bytes, header needs {ARCHIVE_HEADER_SIZE}",
                    data.len()
                ),
            ));
        }

        let mut r = ByteReader::new(&data[..ARCHIVE_HEADER_SIZE]);
        let truncated = |e: std::io::Error| Error::corrupt_header(0, e.to_string());

        let password_checksum = r.read_array::<DIGEST_SIZE>().map_err(truncated)?;
        let key = ArchiveKey::from_bytes(r.read_array::<KEY_LEN>().map_err(truncated)?);
        let payload_checksum = r.read_array::<DIGEST_SIZE>().map_err(truncated)?;

        let codec = Codec::from_id(r.read_u8().map_err(truncated)?)?;

        let unit_offset = r.position() as u64;
        let unit_len = r.read_uint_le(UNIT_LEN_SIZE).map_err(truncated)? as u16;
        let unit_len = NonZeroU16::new(unit_len)
            .ok_or_else(|| Error::corrupt_header(unit_offset, "unit length is zero"))?;

        let size_offset = r.position() as u64;
        let payload_size = r.read_uint_le(PAYLOAD_SIZE_SIZE).map_err(truncated)?;
        let payload_size = u64::try_from(payload_size).map_err(|_| {
            Error::corrupt_header(size_offset, format!("payload size {payload_size} too large"))
        })?;

        let entry_count = r.read_uint_le(ENTRY_COUNT_SIZE).map_err(truncated)? as u32;

        Ok(Self {
            password_checksum,
            key,
            payload_checksum,
            codec,
            unit_len,
            payload_size,
            entry_count,
        })
    }
}
