//! Entry compression.
//!
//! Turns the contents of one file into a complete entry record: the
//! codec-specific header, the name, and the encoded body.

use std::num::NonZeroU16;

use crate::codec::{Codec, huffman, rle};
use crate::format::{EntryHeader, HuffmanEntryHeader, RleEntryHeader};
use crate::{EntryName, Result};

/// Encodes `data` and appends a full entry record to `payload`.
///
/// Returns the number of bytes appended. Nothing is appended on error.
///
/// # Errors
///
/// Returns [`Error::FieldOverflow`](crate::Error::FieldOverflow) if a
/// length does not fit its header field.
pub(crate) fn compress_entry(
    codec: Codec,
    unit_len: NonZeroU16,
    name: &EntryName,
    data: &[u8],
    payload: &mut Vec<u8>,
) -> Result<usize> {
    let start = payload.len();
    match codec {
        Codec::Huffman => {
            let (bits, tree) = huffman::encode(data);
            let tree_bytes = tree.to_bytes();
            let header = EntryHeader::Huffman(HuffmanEntryHeader {
                name: name.clone(),
                bitstream_len: bits.bytes().len() as u64,
                tree_len: tree_bytes.len() as u64,
                bit_len: bits.bit_len(),
            });
            header.write_to(payload)?;
            payload.extend_from_slice(&tree_bytes);
            payload.extend_from_slice(bits.bytes());
        }
        Codec::Rle => {
            let body = rle::records_to_bytes(&rle::encode(data, unit_len));
            let header = EntryHeader::Rle(RleEntryHeader {
                name: name.clone(),
                data_len: body.len() as u64,
            });
            header.write_to(payload)?;
            payload.extend_from_slice(&body);
        }
    }
    let written = payload.len() - start;
    log::trace!(
        "encoded '{}' with {codec}: {} -> {written} bytes",
        name,
        data.len()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{HUFFMAN_ENTRY_FIXED_SIZE, RLE_ENTRY_FIXED_SIZE};
    use crate::format::reader::ByteReader;

    fn unit(n: u16) -> NonZeroU16 {
        NonZeroU16::new(n).unwrap()
    }

    #[test]
    fn test_huffman_record_layout() {
        let name = EntryName::new("aab.txt").unwrap();
        let mut payload = Vec::new();
        let written = compress_entry(Codec::Huffman, unit(1), &name, b"aab", &mut payload).unwrap();
        assert_eq!(written, payload.len());

        let tree = b"3,98sep1,None,None,97sep2,None,None";
        let mut r = ByteReader::new(&payload);
        let header = EntryHeader::parse(Codec::Huffman, &mut r).unwrap();
        assert_eq!(r.position(), HUFFMAN_ENTRY_FIXED_SIZE + name.len());
        match header {
            EntryHeader::Huffman(h) => {
                assert_eq!(h.tree_len as usize, tree.len());
                assert_eq!(h.bit_len, 3);
                assert_eq!(h.bitstream_len, 1);
            }
            EntryHeader::Rle(_) => panic!("expected a Huffman header"),
        }
        assert_eq!(r.read_bytes(tree.len()).unwrap(), tree);
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn test_rle_record_layout() {
        let name = EntryName::new("runs").unwrap();
        let mut payload = vec![0xFF];
        compress_entry(Codec::Rle, unit(2), &name, b"ababx", &mut payload).unwrap();
        let body = &payload[1 + RLE_ENTRY_FIXED_SIZE + name.len()..];
        assert_eq!(body, &[2, 0, b'a', b'b', 1, 0, b'x']);
    }

    #[test]
    fn test_empty_file() {
        let name = EntryName::new("empty").unwrap();
        let mut payload = Vec::new();
        compress_entry(Codec::Huffman, unit(1), &name, b"", &mut payload).unwrap();
        assert_eq!(payload.len(), HUFFMAN_ENTRY_FIXED_SIZE + name.len());
    }
}
