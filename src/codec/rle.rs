//! Run-length encoding over fixed-length units.
//!
//! The input is cut into windows of `unit_len` bytes. Consecutive equal
//! windows collapse into one record holding the repeat count and the window.
//! When the input length is not a multiple of `unit_len`, the trailing short
//! window becomes a final record with count 1.
//!
//! Records are stored back to back as `count(2, LE) | unit`. A record whose
//! unit would run past the end of the data is the short remainder record, so
//! no length prefix is needed for it.
//!
//! Counts are 16-bit; a run longer than `u16::MAX` windows is split into
//! several records of the same unit.

use std::num::NonZeroU16;

use super::CodecError;

/// Width of the repeat count of a record.
pub const COUNT_SIZE: usize = 2;

/// One run: `unit` repeated `count` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleRecord {
    /// Number of repetitions, at least 1.
    pub count: u16,
    /// The repeated window.
    pub unit: Vec<u8>,
}

/// Encodes `data` into run records of `unit_len`-byte windows.
pub fn encode(data: &[u8], unit_len: NonZeroU16) -> Vec<RleRecord> {
    let unit_len = usize::from(unit_len.get());
    let mut records: Vec<RleRecord> = Vec::new();
    let mut windows = data.chunks_exact(unit_len);

    for window in windows.by_ref() {
        match records.last_mut() {
            Some(last) if last.unit == window && last.count < u16::MAX => last.count += 1,
            _ => records.push(RleRecord {
                count: 1,
                unit: window.to_vec(),
            }),
        }
    }

    let remainder = windows.remainder();
    if !remainder.is_empty() {
        records.push(RleRecord {
            count: 1,
            unit: remainder.to_vec(),
        });
    }
    records
}

/// Expands records back into the original bytes.
pub fn decode(records: &[RleRecord]) -> Vec<u8> {
    let len = records
        .iter()
        .map(|record| record.unit.len() * usize::from(record.count))
        .sum();
    let mut output = Vec::with_capacity(len);
    for record in records {
        for _ in 0..record.count {
            output.extend_from_slice(&record.unit);
        }
    }
    output
}

/// Serializes records into their stored byte layout.
pub fn records_to_bytes(records: &[RleRecord]) -> Vec<u8> {
    let len = records
        .iter()
        .map(|record| COUNT_SIZE + record.unit.len())
        .sum();
    let mut bytes = Vec::with_capacity(len);
    for record in records {
        bytes.extend_from_slice(&record.count.to_le_bytes());
        bytes.extend_from_slice(&record.unit);
    }
    bytes
}

/// Parses the stored byte layout back into records.
pub fn records_from_bytes(data: &[u8], unit_len: NonZeroU16) -> Result<Vec<RleRecord>, CodecError> {
    let unit_len = usize::from(unit_len.get());
    let mut records = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let count_bytes = data.get(pos..pos + COUNT_SIZE).ok_or_else(|| {
            CodecError::MalformedRecords(format!("truncated count at offset {pos}"))
        })?;
        let count = u16::from_le_bytes([count_bytes[0], count_bytes[1]]);
        pos += COUNT_SIZE;
        if count == 0 {
            return Err(CodecError::MalformedRecords(format!(
                "zero repeat count at offset {}",
                pos - COUNT_SIZE
            )));
        }

        let end = (pos + unit_len).min(data.len());
        let unit = &data[pos..end];
        if unit.len() < unit_len {
            if unit.is_empty() {
                return Err(CodecError::MalformedRecords(
                    "count without a unit at end of data".into(),
                ));
            }
            if count != 1 {
                return Err(CodecError::MalformedRecords(format!(
                    "remainder record repeated {count} times"
                )));
            }
        }
        records.push(RleRecord {
            count,
            unit: unit.to_vec(),
        });
        pos = end;
    }
    Ok(records)
}
