//! Statistics reported by archive operations.
//!
//! Every engine operation returns an [`OperationStats`]. Its `Display`
//! implementation renders the human-readable summary shown to users:
//!
//! ```text
//! Compression Time: 0.02 seconds
//! Files Size Before: 10240 bytes
//! Files Size After: 6173 bytes
//! Archive Size: 6282 bytes
//! ```
//!
//! Add, delete and update report how the archive file changed instead:
//!
//! ```text
//! Deletion Time: 0.01 seconds
//! Archive Size Before: 6282 bytes
//! Archive Size After: 4120 bytes
//! ```

use std::fmt;
use std::time::Duration;

/// The operation that produced a set of statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A new archive was created.
    Compress,
    /// Entries were written to a destination directory.
    Extract,
    /// Entries were appended to an archive.
    Add,
    /// An entry or directory was removed and the archive rebuilt.
    Delete,
    /// An entry was replaced with new contents.
    Update,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Self::Compress => "Compression",
            Self::Extract => "Extraction",
            Self::Add => "Addition",
            Self::Delete => "Deletion",
            Self::Update => "Update",
        }
    }
}

/// Timing and size figures for one operation.
#[must_use = "operation statistics should be reported or checked"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStats {
    /// The operation that ran.
    pub operation: Operation,
    /// Wall-clock duration of the operation.
    pub elapsed: Duration,
    /// Bytes of source data read (compress, add, update, delete) or
    /// written (extract).
    pub input_bytes: u64,
    /// Decrypted payload size of the archive after the operation.
    pub payload_bytes: u64,
    /// Size of the archive file after the operation.
    pub archive_bytes: u64,
    /// Size of the archive file before an edit; 0 for compress and extract.
    pub archive_bytes_before: u64,
    /// Entries stored in the archive (or written, for extract).
    pub entries: u32,
}

impl OperationStats {
    /// Creates statistics for `operation` with zeroed figures.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            elapsed: Duration::ZERO,
            input_bytes: 0,
            payload_bytes: 0,
            archive_bytes: 0,
            archive_bytes_before: 0,
            entries: 0,
        }
    }

    /// Relabels these statistics as the result of an enclosing edit that
    /// started from an archive of `archive_bytes_before` bytes.
    pub(crate) fn relabel(
        mut self,
        operation: Operation,
        archive_bytes_before: u64,
        elapsed: Duration,
    ) -> Self {
        self.operation = operation;
        self.archive_bytes_before = archive_bytes_before;
        self.elapsed = elapsed;
        self
    }

    /// Returns payload size divided by input size, or 0 for empty inputs.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bytes as f64 / self.input_bytes as f64
        }
    }
}

impl fmt::Display for OperationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} Time: {:.2} seconds",
            self.operation.label(),
            self.elapsed.as_secs_f64()
        )?;
        match self.operation {
            Operation::Extract => {
                writeln!(f, "Files Extracted: {}", self.entries)?;
                writeln!(f, "Bytes Written: {} bytes", self.input_bytes)
            }
            Operation::Add | Operation::Delete | Operation::Update => {
                writeln!(f, "Archive Size Before: {} bytes", self.archive_bytes_before)?;
                writeln!(f, "Archive Size After: {} bytes", self.archive_bytes)
            }
            Operation::Compress => {
                writeln!(f, "Files Size Before: {} bytes", self.input_bytes)?;
                writeln!(f, "Files Size After: {} bytes", self.payload_bytes)?;
                writeln!(f, "Archive Size: {} bytes", self.archive_bytes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_summary() {
        let stats = OperationStats {
            operation: Operation::Compress,
            elapsed: Duration::from_millis(1234),
            input_bytes: 100,
            payload_bytes: 60,
            archive_bytes: 169,
            archive_bytes_before: 0,
            entries: 2,
        };
        assert_eq!(
            stats.to_string(),
            "Compression Time: 1.23 seconds\n\
             Files Size Before: 100 bytes\n\
             Files Size After: 60 bytes\n\
             Archive Size: 169 bytes\n"
        );
        assert!((stats.compression_ratio() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_extract_summary() {
        let mut stats = OperationStats::new(Operation::Extract);
        stats.entries = 3;
        stats.input_bytes = 42;
        let text = stats.to_string();
        assert!(text.starts_with("Extraction Time: 0.00 seconds\n"));
        assert!(text.contains("Files Extracted: 3"));
        assert!(text.contains("Bytes Written: 42 bytes"));
    }

    #[test]
    fn test_relabel() {
        let mut stats = OperationStats::new(Operation::Compress);
        stats.archive_bytes = 120;
        let stats = stats.relabel(Operation::Delete, 300, Duration::from_secs(2));
        assert_eq!(stats.operation, Operation::Delete);
        assert_eq!(stats.archive_bytes_before, 300);
        assert_eq!(
            stats.to_string(),
            "Deletion Time: 2.00 seconds\n\
             Archive Size Before: 300 bytes\n\
             Archive Size After: 120 bytes\n"
        );
    }

    #[test]
    fn test_ratio_of_empty_input() {
        assert_eq!(OperationStats::new(Operation::Add).compression_ratio(), 0.0);
    }
}
