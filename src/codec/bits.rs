//! Bit-packing for Huffman bitstreams.
//!
//! Bits are stored most-significant-bit first. The final byte is padded on
//! the right with zero bits, and the unpadded bit length travels alongside
//! the bytes so the padding can be dropped when the stream is read back.

/// A byte-aligned bitstream together with its unpadded length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl PackedBits {
    /// Reassembles a packed stream from stored bytes and bit length.
    ///
    /// Returns `None` unless `bytes` is exactly the number of bytes needed
    /// to hold `bit_len` bits.
    pub fn from_parts(bytes: Vec<u8>, bit_len: u64) -> Option<Self> {
        if bit_len.div_ceil(8) != bytes.len() as u64 {
            return None;
        }
        Some(Self { bytes, bit_len })
    }

    /// Returns the padded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of meaningful bits.
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Consumes the stream and returns the padded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Iterates over the meaningful bits, skipping the padding.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            bytes: &self.bytes,
            pos: 0,
            end: self.bit_len,
        }
    }
}

/// Iterator over the bits of a [`PackedBits`].
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    bytes: &'a [u8],
    pos: u64,
    end: u64,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.end {
            return None;
        }
        let byte = self.bytes[(self.pos / 8) as usize];
        let bit = (byte >> (7 - (self.pos % 8))) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.pos) as usize;
        (remaining, Some(remaining))
    }
}

/// Accumulates bits into bytes, most significant bit first.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
    bit_len: u64,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.current = (self.current << 1) | bit as u8;
        self.filled += 1;
        self.bit_len += 1;
        if self.filled == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    /// Appends every bit of `bits` in order.
    pub fn push_all(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push(bit);
        }
    }

    /// Returns the number of bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Pads the last byte with zero bits and returns the packed stream.
    pub fn finish(mut self) -> PackedBits {
        if self.filled > 0 {
            self.bytes.push(self.current << (8 - self.filled));
        }
        PackedBits {
            bytes: self.bytes,
            bit_len: self.bit_len,
        }
    }
}

/// Packs a bit sequence into zero-padded bytes.
pub fn pack<I: IntoIterator<Item = bool>>(bits: I) -> PackedBits {
    let mut writer = BitWriter::new();
    for bit in bits {
        writer.push(bit);
    }
    writer.finish()
}

/// Expands bytes into bits, padding included.
///
/// This is the inverse of [`pack`] before truncation to the unpadded length.
pub fn unpack(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}
