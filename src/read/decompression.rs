//! Decoding entry bodies back into file contents.

use crate::codec::bits::PackedBits;
use crate::codec::huffman::{self, HuffmanTree, Node};
use crate::codec::{CodecError, rle};
use crate::format::EntryHeader;
use crate::{Error, Result};

use super::{Archive, Entry};

impl Archive {
    /// Decodes the contents of one entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptPayload`] if the tree, bitstream or run
    /// records of the entry are malformed.
    pub fn decode_entry(&self, entry: &Entry) -> Result<Vec<u8>> {
        let body = self
            .payload
            .get(entry.body.clone())
            .ok_or_else(|| Error::corrupt_payload(entry.offset(), "entry body out of range"))?;
        let corrupt = |e: CodecError| {
            Error::corrupt_payload(entry.offset(), format!("entry '{}': {e}", entry.name()))
        };

        match &entry.header {
            EntryHeader::Huffman(h) => {
                let (tree_bytes, bitstream) = usize::try_from(h.tree_len)
                    .ok()
                    .and_then(|tree_len| Some((body.get(..tree_len)?, body.get(tree_len..)?)))
                    .ok_or_else(|| {
                        Error::corrupt_payload(
                            entry.offset(),
                            format!(
                                "entry '{}': tree of {} bytes exceeds a body of {} bytes",
                                entry.name(),
                                h.tree_len,
                                body.len()
                            ),
                        )
                    })?;
                let tree = HuffmanTree::from_bytes(tree_bytes).map_err(corrupt)?;
                // A single-symbol file is written as one zero bit per byte.
                if let Some(Node::Leaf { freq, .. }) = tree.root() {
                    if *freq != h.bit_len {
                        return Err(Error::corrupt_payload(
                            entry.offset(),
                            format!(
                                "entry '{}': single-symbol tree counts {freq} bytes, bitstream holds {}",
                                entry.name(),
                                h.bit_len
                            ),
                        ));
                    }
                }
                let bits = PackedBits::from_parts(bitstream.to_vec(), h.bit_len).ok_or_else(|| {
                    Error::corrupt_payload(
                        entry.offset(),
                        format!(
                            "entry '{}': {} bits need a different padding than {} bytes",
                            entry.name(),
                            h.bit_len,
                            bitstream.len()
                        ),
                    )
                })?;
                huffman::decode(&bits, &tree).map_err(corrupt)
            }
            EntryHeader::Rle(_) => {
                let records =
                    rle::records_from_bytes(body, self.header.unit_len).map_err(corrupt)?;
                Ok(rle::decode(&records))
            }
        }
    }
}
