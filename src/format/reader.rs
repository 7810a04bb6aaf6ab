//! Low-level binary reading and writing utilities for archive parsing.
//!
//! All integers in the archive format are little-endian. Several fields use
//! widths that are not native integer sizes (5, 7 and 10 bytes), so values
//! are carried as `u128` while encoding and decoding and narrowed by callers.

use std::io;

use crate::{Error, Result};

/// Appends `value` as a `width`-byte little-endian integer.
///
/// # Errors
///
/// Returns [`Error::FieldOverflow`] if `value` needs more than `width` bytes.
pub fn write_uint_le(
    buf: &mut Vec<u8>,
    value: u128,
    width: usize,
    field: &'static str,
) -> Result<()> {
    debug_assert!(width <= 16, "field wider than u128");
    if width < 16 && value >> (8 * width) != 0 {
        return Err(Error::FieldOverflow {
            field,
            width,
            value,
        });
    }
    buf.extend_from_slice(&value.to_le_bytes()[..width]);
    Ok(())
}

/// Decodes a little-endian integer of up to 16 bytes.
pub fn uint_from_le(bytes: &[u8]) -> u128 {
    bytes
        .iter()
        .rev()
        .fold(0u128, |acc, &byte| (acc << 8) | u128::from(byte))
}

/// A cursor over a byte slice that reports truncation as `UnexpectedEof`.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if every byte has been read.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads the next `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> io::Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "needed {count} bytes at offset {}, only {} left",
                    self.pos,
                    self.remaining()
                ),
            ));
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> io::Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Reads a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    /// Reads a `width`-byte little-endian integer.
    pub fn read_uint_le(&mut self, width: usize) -> io::Result<u128> {
        Ok(uint_from_le(self.read_bytes(width)?))
    }
}
