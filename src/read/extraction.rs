//! File extraction from archives.

use std::fs;
use std::path::Path;

use crate::Result;

use super::{Archive, ExtractResult};

impl Archive {
    /// Decodes every entry in archive order.
    ///
    /// Nothing is returned unless all entries decode cleanly.
    pub fn decode_all(&self) -> Result<Vec<(&super::Entry, Vec<u8>)>> {
        self.entries
            .iter()
            .map(|entry| Ok((entry, self.decode_entry(entry)?)))
            .collect()
    }

    /// Extracts every entry below `dest`.
    ///
    /// Standalone entries are written directly into `dest`; directory
    /// members are written into `dest/<dir>/`. `dest` and the member
    /// directories are created as needed, and existing files are replaced.
    ///
    /// All entries are decoded before anything is written, so a corrupt
    /// entry leaves `dest` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptPayload`](crate::Error::CorruptPayload) if an
    /// entry fails to decode, or [`Error::Io`](crate::Error::Io) if writing
    /// fails.
    pub fn extract_to(&self, dest: impl AsRef<Path>) -> Result<ExtractResult> {
        let dest = dest.as_ref();
        let decoded = self.decode_all()?;

        fs::create_dir_all(dest)?;
        let mut result = ExtractResult::default();
        for (entry, data) in decoded {
            let name = entry.name();
            let target = match name.dir_name() {
                Some(dir) => {
                    let dir = dest.join(dir);
                    fs::create_dir_all(&dir)?;
                    dir.join(name.file_name())
                }
                None => dest.join(name.as_str()),
            };
            fs::write(&target, &data)?;
            log::trace!("extracted '{}' ({} bytes)", name, data.len());
            result.entries_extracted += 1;
            result.bytes_extracted += data.len() as u64;
        }

        log::debug!(
            "extracted {} entries from {} into {}",
            result.entries_extracted,
            self.path.display(),
            dest.display()
        );
        Ok(result)
    }
}
