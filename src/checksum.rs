//! Checksum computation utilities.
//!
//! Archives carry two 16-byte MD5 digests in their header: one over the
//! password bytes, used as an access check, and one over the decrypted
//! payload, verified on every read before any entry is decoded.
//!
//! # Example
//!
//! ```rust
//! use binarc::checksum::{Checksum, Md5};
//!
//! let mut md5 = Md5::new();
//! md5.update(b"Hello, ");
//! md5.update(b"World!");
//! assert_eq!(md5.finalize(), Md5::compute(b"Hello, World!"));
//! ```

/// Size of a digest stored in the archive header.
pub const DIGEST_SIZE: usize = 16;

/// Common trait for checksum computation.
pub trait Checksum: Default + Clone {
    /// The output type of this checksum.
    type Output: Copy + Eq + std::fmt::Debug;

    /// Creates a new checksum calculator.
    fn new() -> Self;

    /// Updates the checksum with additional data.
    fn update(&mut self, data: &[u8]);

    /// Finishes the checksum computation and returns the value.
    fn finalize(&self) -> Self::Output;

    /// Computes the checksum of a single slice in one call.
    fn compute(data: &[u8]) -> Self::Output {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

/// MD5 digest calculator.
#[derive(Clone)]
pub struct Md5 {
    context: md5::Context,
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Md5 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Md5").finish_non_exhaustive()
    }
}

impl Checksum for Md5 {
    type Output = [u8; DIGEST_SIZE];

    fn new() -> Self {
        Self {
            context: md5::Context::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.context.consume(data);
    }

    fn finalize(&self) -> [u8; DIGEST_SIZE] {
        self.context.clone().compute().0
    }
}
