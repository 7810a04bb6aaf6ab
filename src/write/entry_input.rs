//! Collection and validation of files to be archived.
//!
//! Standalone files become entries named by their file name. A directory
//! contributes each regular file it directly contains, named
//! `dirname/filename`. Directories holding anything but regular files are
//! rejected, so archives never need more than one level of nesting.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::num::NonZeroU16;
use std::path::{Path, PathBuf};

use crate::{EntryName, Error, Result};

/// A file on disk and the name it will be stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInput {
    /// Path of the source file.
    pub source: PathBuf,
    /// Name of the entry inside the archive.
    pub name: EntryName,
    /// Size of the source file when it was collected.
    pub size: u64,
}

fn map_not_found(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    }
}

fn utf8_name<'a>(path: &'a Path, component: Option<&'a std::ffi::OsStr>) -> Result<&'a str> {
    component
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidEntryName(format!("'{}' has no usable name", path.display())))
}

impl EntryInput {
    /// Collects a standalone file, stored under its file name.
    ///
    /// # Errors
    ///
    /// - [`Error::InputNotFound`] if `path` does not exist
    /// - [`Error::InvalidInput`] if `path` is not a regular file
    /// - [`Error::InvalidEntryName`] if the file name cannot be stored
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = EntryName::new(utf8_name(path, path.file_name())?)?;
        Self::file_as(path, name)
    }

    /// Collects a file that will be stored under an explicit name.
    pub fn file_as(path: impl AsRef<Path>, name: EntryName) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(map_not_found(path))?;
        if !metadata.is_file() {
            return Err(Error::invalid_input(path, "not a regular file"));
        }
        Ok(Self {
            source: path.to_path_buf(),
            name,
            size: metadata.len(),
        })
    }

    /// Collects every file directly inside `dir`, in file-name order.
    ///
    /// # Errors
    ///
    /// - [`Error::InputNotFound`] if `dir` does not exist
    /// - [`Error::InvalidInput`] if `dir` is not a directory or contains
    ///   anything other than regular files
    pub fn dir_members(dir: impl AsRef<Path>) -> Result<Vec<Self>> {
        let dir = dir.as_ref();
        let canonical = fs::canonicalize(dir).map_err(map_not_found(dir))?;
        if !canonical.is_dir() {
            return Err(Error::invalid_input(dir, "not a directory"));
        }
        let dir_name = utf8_name(dir, canonical.file_name())?;

        let mut paths = fs::read_dir(&canonical)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        paths.sort();

        paths
            .iter()
            .map(|path| {
                let metadata = fs::metadata(path)?;
                if !metadata.is_file() {
                    return Err(Error::invalid_input(
                        dir,
                        format!("contains '{}', which is not a regular file", path.display()),
                    ));
                }
                let name = EntryName::in_dir(dir_name, utf8_name(path, path.file_name())?)?;
                Ok(Self {
                    source: path.clone(),
                    name,
                    size: metadata.len(),
                })
            })
            .collect()
    }

    /// Collects a path that may be either a file or a directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(map_not_found(path))?;
        if metadata.is_dir() {
            Self::dir_members(path)
        } else {
            Ok(vec![Self::file(path)?])
        }
    }

    /// Reads the source file.
    pub fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.source).map_err(map_not_found(&self.source))
    }
}

/// Validates an RLE unit length against a batch of inputs.
///
/// The unit length must be at least 1 and no larger than the smallest input.
/// An empty batch only needs a non-zero unit length.
pub fn check_unit_len(inputs: &[EntryInput], unit_len: u16) -> Result<NonZeroU16> {
    let unit = NonZeroU16::new(unit_len).ok_or_else(|| Error::InvalidUnitLength {
        unit_len: 0,
        reason: "must be at least 1".into(),
    })?;
    if let Some(smallest) = inputs.iter().map(|input| input.size).min() {
        if u64::from(unit_len) > smallest {
            return Err(Error::InvalidUnitLength {
                unit_len: usize::from(unit_len),
                reason: format!("longer than the smallest input file ({smallest} bytes)"),
            });
        }
    }
    Ok(unit)
}

/// Checks that no two entries collide once extracted.
///
/// Besides exact duplicates, a standalone file named like a directory
/// collides with that directory's members.
pub fn check_unique_names<'a, I>(names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a EntryName>,
{
    let mut files = HashSet::new();
    let mut dirs = HashSet::new();
    for name in names {
        if !files.insert(name.as_str()) {
            return Err(Error::EntryExists {
                path: name.to_string(),
            });
        }
        if let Some(dir) = name.dir_name() {
            dirs.insert(dir);
        }
    }
    if let Some(clash) = files.iter().find(|name| dirs.contains(*name)) {
        return Err(Error::EntryExists {
            path: clash.to_string(),
        });
    }
    Ok(())
}
