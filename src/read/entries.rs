//! Walking the entry records of a decrypted payload.

use std::ops::Range;

use crate::codec::Codec;
use crate::format::EntryHeader;
use crate::format::reader::ByteReader;
use crate::{EntryName, Error, Result};

/// One entry record located inside a decrypted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The parsed entry header.
    pub header: EntryHeader,
    /// Byte range of the whole record, header included.
    pub record: Range<usize>,
    /// Byte range of the encoded body.
    pub body: Range<usize>,
}

impl Entry {
    /// Returns the entry name.
    pub fn name(&self) -> &EntryName {
        self.header.name()
    }

    /// Returns true if the entry belongs to a compressed directory.
    pub fn is_dir(&self) -> bool {
        self.header.is_dir()
    }

    /// Returns the size of the stored record in bytes.
    pub fn stored_size(&self) -> u64 {
        self.record.len() as u64
    }

    /// Returns the payload offset of the record.
    pub fn offset(&self) -> u64 {
        self.record.start as u64
    }
}

/// Splits `payload` into exactly `expected` entry records.
///
/// # Errors
///
/// Returns [`Error::CorruptPayload`] if a record is malformed or runs past
/// the end of the payload, or if the payload holds more or fewer records
/// than `expected`.
pub(crate) fn parse_entries(codec: Codec, payload: &[u8], expected: u32) -> Result<Vec<Entry>> {
    let mut r = ByteReader::new(payload);
    let mut entries = Vec::with_capacity(expected.min(4096) as usize);

    for index in 0..expected {
        let start = r.position();
        if r.is_empty() {
            return Err(Error::corrupt_payload(
                start as u64,
                format!("payload ends after {index} of {expected} entries"),
            ));
        }
        let header = EntryHeader::parse(codec, &mut r)?;
        let body_start = r.position();
        let body_len = header
            .body_len()
            .and_then(|len| usize::try_from(len).ok())
            .filter(|len| *len <= r.remaining())
            .ok_or_else(|| {
                let declared = match header.body_len() {
                    Some(len) => len.to_string(),
                    None => "more than 2^64".to_string(),
                };
                Error::corrupt_payload(
                    start as u64,
                    format!(
                        "entry '{}' declares {declared} body bytes, {} remain",
                        header.name(),
                        r.remaining()
                    ),
                )
            })?;
        r.read_bytes(body_len)
            .map_err(|e| Error::corrupt_payload(start as u64, e.to_string()))?;
        entries.push(Entry {
            header,
            record: start..r.position(),
            body: body_start..body_start + body_len,
        });
    }

    if !r.is_empty() {
        return Err(Error::corrupt_payload(
            r.position() as u64,
            format!("{} trailing bytes after {expected} entries", r.remaining()),
        ));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{HuffmanEntryHeader, RleEntryHeader};

    fn record(name: &str, body: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        EntryHeader::Rle(RleEntryHeader {
            name: EntryName::new(name).unwrap(),
            data_len: body.len() as u64,
        })
        .write_to(&mut buf)
        .unwrap();
        buf.extend_from_slice(body);
        buf
    }

    #[test]
    fn test_parse_two_entries() {
        let mut payload = record("a", &[1, 0, b'x']);
        let first_len = payload.len();
        payload.extend(record("d/b", &[2, 0, b'y']));

        let entries = parse_entries(Codec::Rle, &payload, 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name().as_str(), "a");
        assert_eq!(entries[0].record, 0..first_len);
        assert_eq!(&payload[entries[0].body.clone()], &[1, 0, b'x']);
        assert!(entries[1].is_dir());
        assert_eq!(entries[1].offset(), first_len as u64);
    }

    #[test]
    fn test_count_mismatch() {
        let payload = record("a", b"\x01\x00x");
        assert!(parse_entries(Codec::Rle, &payload, 2).unwrap_err().is_corruption());
        let err = parse_entries(Codec::Rle, &payload, 0).unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn test_body_past_end() {
        let mut payload = record("a", b"\x01\x00x");
        payload.pop();
        assert!(parse_entries(Codec::Rle, &payload, 1).unwrap_err().is_corruption());
    }

    #[test]
    fn test_huffman_lengths_overflow() {
        let mut payload = Vec::new();
        EntryHeader::Huffman(HuffmanEntryHeader {
            name: EntryName::new("a").unwrap(),
            bitstream_len: u64::MAX,
            tree_len: 1,
            bit_len: 0,
        })
        .write_to(&mut payload)
        .unwrap();
        payload.extend_from_slice(b"\x00\x00");
        let err = parse_entries(Codec::Huffman, &payload, 1).unwrap_err();
        assert!(err.is_corruption());
        assert!(err.to_string().contains("more than 2^64"));
    }

    #[test]
    fn test_empty_payload() {
        assert!(parse_entries(Codec::Huffman, &[], 0).unwrap().is_empty());
    }
}
