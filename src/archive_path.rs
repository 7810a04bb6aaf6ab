//! Entry name type with validation for safe extraction.

use crate::{Error, Result};
use std::fmt;

/// Maximum length for entry names (in bytes).
const MAX_NAME_LENGTH: usize = 4096;

/// A validated entry name.
///
/// Entries are either standalone files, named by their bare file name, or
/// members of a compressed directory, named `dirname/filename`. An
/// `EntryName` therefore has one or two segments and validates that:
/// - The name is non-empty ASCII without NUL bytes or backslashes
/// - There is at most one `/`, and it is neither leading nor trailing
/// - No segment is `.` or `..` (prevents path traversal)
///
/// # Examples
///
/// ```
/// use binarc::EntryName;
///
/// let name = EntryName::new("docs/readme.txt").unwrap();
/// assert_eq!(name.dir_name(), Some("docs"));
/// assert_eq!(name.file_name(), "readme.txt");
///
/// assert!(EntryName::new("../secret").is_err());
/// assert!(EntryName::new("a/b/c.txt").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryName(String);

impl EntryName {
    /// Creates a new `EntryName` from a string, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntryName`] if the name breaks any of the
    /// rules listed on the type.
    pub fn new(s: &str) -> Result<Self> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }

    /// Creates the name of a file that belongs to the directory `dir`.
    pub fn in_dir(dir: &str, file: &str) -> Result<Self> {
        if dir.contains('/') || file.contains('/') {
            return Err(Error::InvalidEntryName(format!(
                "'{dir}/{file}' must have exactly two segments"
            )));
        }
        Self::new(&format!("{dir}/{file}"))
    }

    fn validate(s: &str) -> Result<()> {
        if s.is_empty() {
            return Err(Error::InvalidEntryName("empty name".into()));
        }

        if s.len() > MAX_NAME_LENGTH {
            return Err(Error::InvalidEntryName(format!(
                "name exceeds maximum length of {MAX_NAME_LENGTH} bytes"
            )));
        }

        if !s.is_ascii() {
            return Err(Error::InvalidEntryName(format!("'{s}' is not ASCII")));
        }

        if s.contains('\0') {
            return Err(Error::InvalidEntryName("contains NUL byte".into()));
        }

        if s.contains('\\') {
            return Err(Error::InvalidEntryName(format!("'{s}' contains a backslash")));
        }

        if s.matches('/').count() > 1 {
            return Err(Error::InvalidEntryName(format!(
                "'{s}' is nested more than one directory deep"
            )));
        }

        for segment in s.split('/') {
            if segment.is_empty() {
                return Err(Error::InvalidEntryName(format!("'{s}' has an empty segment")));
            }
            if segment == "." || segment == ".." {
                return Err(Error::InvalidEntryName(format!(
                    "'{segment}' segment not allowed"
                )));
            }
        }

        Ok(())
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; names are validated non-empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this entry came from a compressed directory.
    pub fn is_dir_member(&self) -> bool {
        self.0.contains('/')
    }

    /// Returns the directory segment, if any.
    pub fn dir_name(&self) -> Option<&str> {
        self.0.split_once('/').map(|(dir, _)| dir)
    }

    /// Returns the file name (last segment).
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for EntryName {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntryName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}
