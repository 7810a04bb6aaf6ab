//! Per-entry header records.
//!
//! Each entry record in the payload starts with a header whose shape depends
//! on the archive codec. The header declares exactly how many body bytes
//! follow the name, which is how a reader walks the payload one entry at a
//! time.

use crate::codec::Codec;
use crate::{EntryName, Error, Result};

use super::reader::{ByteReader, write_uint_le};
use super::{
    BIT_LEN_SIZE, DATA_LEN_SIZE, HUFFMAN_ENTRY_FIXED_SIZE, NAME_LEN_SIZE, RLE_ENTRY_FIXED_SIZE,
    TREE_LEN_SIZE,
};

/// Header of a Huffman-coded entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanEntryHeader {
    /// Entry name; directory members carry a `dir/` prefix.
    pub name: EntryName,
    /// Length of the zero-padded bitstream in bytes.
    pub bitstream_len: u64,
    /// Length of the serialized tree in bytes.
    pub tree_len: u64,
    /// Number of meaningful bits in the bitstream.
    pub bit_len: u64,
}

/// Header of a run-length-coded entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleEntryHeader {
    /// Entry name; directory members carry a `dir/` prefix.
    pub name: EntryName,
    /// Length of the serialized records in bytes.
    pub data_len: u64,
}

/// The header of one entry record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryHeader {
    /// Huffman entry.
    Huffman(HuffmanEntryHeader),
    /// RLE entry.
    Rle(RleEntryHeader),
}

impl EntryHeader {
    /// Returns the entry name.
    pub fn name(&self) -> &EntryName {
        match self {
            Self::Huffman(h) => &h.name,
            Self::Rle(h) => &h.name,
        }
    }

    /// Returns true if the entry came from a compressed directory.
    pub fn is_dir(&self) -> bool {
        self.name().is_dir_member()
    }

    /// Returns the codec this header belongs to.
    pub fn codec(&self) -> Codec {
        match self {
            Self::Huffman(_) => Codec::Huffman,
            Self::Rle(_) => Codec::Rle,
        }
    }

    /// Returns the number of body bytes following the header, or `None` if
    /// the declared lengths overflow.
    pub fn body_len(&self) -> Option<u64> {
        match self {
            Self::Huffman(h) => h.tree_len.checked_add(h.bitstream_len),
            Self::Rle(h) => Some(h.data_len),
        }
    }

    /// Returns the encoded size of the header, name included.
    pub fn encoded_len(&self) -> usize {
        let fixed = match self {
            Self::Huffman(_) => HUFFMAN_ENTRY_FIXED_SIZE,
            Self::Rle(_) => RLE_ENTRY_FIXED_SIZE,
        };
        fixed + self.name().len()
    }

    /// Appends the encoded header to `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldOverflow`] if a length does not fit its field.
    /// Nothing is appended on error.
    pub fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        let mut header = Vec::with_capacity(self.encoded_len());
        header.push(u8::from(self.is_dir()));
        match self {
            Self::Huffman(h) => {
                write_uint_le(&mut header, h.bitstream_len.into(), DATA_LEN_SIZE, "bitstream_len")?;
                write_uint_le(&mut header, h.tree_len.into(), TREE_LEN_SIZE, "tree_len")?;
                write_uint_le(&mut header, h.bit_len.into(), BIT_LEN_SIZE, "bit_len")?;
            }
            Self::Rle(h) => {
                write_uint_le(&mut header, h.data_len.into(), DATA_LEN_SIZE, "data_len")?;
            }
        }
        let name = self.name().as_str();
        write_uint_le(&mut header, name.len() as u128, NAME_LEN_SIZE, "name_len")?;
        header.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(&header);
        Ok(())
    }

    /// Parses the next entry header for an archive using `codec`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptPayload`] if the header is truncated, the
    /// directory flag is not 0 or 1, the name is invalid or disagrees with
    /// the flag, or the Huffman bit length exceeds its bitstream.
    pub fn parse(codec: Codec, r: &mut ByteReader<'_>) -> Result<Self> {
        let start = r.position() as u64;
        let truncated = |e: std::io::Error| Error::corrupt_payload(start, e.to_string());

        let is_dir = match r.read_u8().map_err(truncated)? {
            0 => false,
            1 => true,
            flag => {
                return Err(Error::corrupt_payload(
                    start,
                    format!("directory flag is {flag}"),
                ));
            }
        };

        let header = match codec {
            Codec::Huffman => {
                let bitstream_len = r.read_uint_le(DATA_LEN_SIZE).map_err(truncated)? as u64;
                let tree_len = r.read_uint_le(TREE_LEN_SIZE).map_err(truncated)? as u64;
                let bit_len = r.read_uint_le(BIT_LEN_SIZE).map_err(truncated)? as u64;
                if bit_len > bitstream_len.saturating_mul(8) {
                    return Err(Error::corrupt_payload(
                        start,
                        format!("{bit_len} bits do not fit in {bitstream_len} bytes"),
                    ));
                }
                let name = read_name(r, start)?;
                Self::Huffman(HuffmanEntryHeader {
                    name,
                    bitstream_len,
                    tree_len,
                    bit_len,
                })
            }
            Codec::Rle => {
                let data_len = r.read_uint_le(DATA_LEN_SIZE).map_err(truncated)? as u64;
                let name = read_name(r, start)?;
                Self::Rle(RleEntryHeader { name, data_len })
            }
        };

        if header.is_dir() != is_dir {
            return Err(Error::corrupt_payload(
                start,
                format!(
                    "directory flag {is_dir} disagrees with entry name '{}'",
                    header.name()
                ),
            ));
        }
        Ok(header)
    }
}

fn read_name(r: &mut ByteReader<'_>, start: u64) -> Result<EntryName> {
    let truncated = |e: std::io::Error| Error::corrupt_payload(start, e.to_string());
    let name_len = r.read_uint_le(NAME_LEN_SIZE).map_err(truncated)? as usize;
    let bytes = r.read_bytes(name_len).map_err(truncated)?;
    let name = std::str::from_utf8(bytes)
        .map_err(|_| Error::corrupt_payload(start, "entry name is not ASCII"))?;
    EntryName::new(name).map_err(|e| Error::corrupt_payload(start, e.to_string()))
}
