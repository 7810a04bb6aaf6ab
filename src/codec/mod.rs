//! Compression codecs for entry payloads.
//!
//! An archive uses one codec for all of its entries, recorded by id in the
//! archive header:
//!
//! - [`Codec::Rle`] (id 1): run-length encoding over fixed-length units.
//! - [`Codec::Huffman`] (id 2): per-entry Huffman coding, unit length fixed at 1.

pub mod bits;
pub mod huffman;
pub mod rle;

use std::str::FromStr;

use crate::{Error, Result};

/// Codec ids as stored in the archive header.
pub mod method {
    /// Run-length encoding.
    pub const RLE: u8 = 1;
    /// Huffman coding.
    pub const HUFFMAN: u8 = 2;
}

/// Failure while decoding a codec body.
///
/// Readers attach the payload offset and report these as
/// [`Error::CorruptPayload`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The serialized Huffman tree cannot be parsed.
    #[error("malformed Huffman tree: {0}")]
    MalformedTree(String),
    /// The Huffman bitstream ends in the middle of a code.
    #[error("Huffman bitstream ends inside a code")]
    TruncatedBitstream,
    /// The RLE record stream cannot be parsed.
    #[error("malformed RLE records: {0}")]
    MalformedRecords(String),
}

/// The compression codec of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Codec {
    /// Run-length encoding.
    Rle,
    /// Huffman coding.
    #[default]
    Huffman,
}

impl Codec {
    /// Returns the header id of this codec.
    pub fn id(self) -> u8 {
        match self {
            Self::Rle => method::RLE,
            Self::Huffman => method::HUFFMAN,
        }
    }

    /// Looks up a codec by header id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCodec`] for unknown ids.
    pub fn from_id(codec_id: u8) -> Result<Self> {
        match codec_id {
            method::RLE => Ok(Self::Rle),
            method::HUFFMAN => Ok(Self::Huffman),
            _ => Err(Error::UnsupportedCodec { codec_id }),
        }
    }

    /// Returns the short name used on the command line (`RLE` or `HUF`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Rle => "RLE",
            Self::Huffman => "HUF",
        }
    }

    /// Returns true if this codec honours a configurable unit length.
    pub fn uses_unit_length(self) -> bool {
        matches!(self, Self::Rle)
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "RLE" => Ok(Self::Rle),
            "HUF" | "HUFFMAN" => Ok(Self::Huffman),
            _ => Err(Error::UnknownCodec(s.to_string())),
        }
    }
}
