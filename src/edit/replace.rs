//! Replacing an entry with fresh contents.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use crate::crypto::Password;
use crate::read::Archive;
use crate::stats::{Operation, OperationStats};
use crate::write::{EntryInput, check_unit_len};
use crate::{EntryName, Error, Result};

use super::{append_inputs, delete};

/// Replaces the entry stored for `path` with its current contents.
///
/// The entry is looked up as `<parent dir>/<file name>` first, so a file
/// that was archived as part of its directory keeps that name, and then as
/// the bare file name. A directory path replaces the whole directory. The
/// old entry is deleted and the new contents appended.
///
/// The input is validated before the archive is touched, so a missing file
/// or an unusable RLE unit length never costs the stored entry.
///
/// # Errors
///
/// - [`Error::InputNotFound`] if `path` does not exist
/// - [`Error::EntryNotFound`] if the archive holds no entry for `path`
/// - Any error of [`delete`] or [`add`](super::add)
pub fn update(
    archive: impl AsRef<Path>,
    path: impl AsRef<Path>,
    password: Option<&Password>,
) -> Result<OperationStats> {
    let start = Instant::now();
    let archive = archive.as_ref();
    let path = path.as_ref();

    let canonical = fs::canonicalize(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    let file_name = canonical
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::invalid_input(path, "path has no usable file name"))?;
    let parent_name = canonical
        .parent()
        .and_then(|parent| parent.file_name())
        .and_then(|name| name.to_str());

    let opened = Archive::open(archive, password)?;
    let size_before = fs::metadata(archive)?.len();
    let target = find_target(&opened, canonical.is_dir(), file_name, parent_name)
        .ok_or_else(|| Error::EntryNotFound {
            path: file_name.to_string(),
        })?;

    let inputs = if target.is_dir_member() {
        vec![EntryInput::file_as(path, target.clone())?]
    } else {
        EntryInput::from_path(path)?
    };
    if opened.codec().uses_unit_length() {
        check_unit_len(&inputs, opened.unit_len().get())?;
    }
    drop(opened);

    delete(archive, target.as_str(), password)?;
    let reopened = Archive::open(archive, password)?;
    let stats = append_inputs(reopened, &inputs)?;

    log::debug!("updated '{target}' in {}", archive.display());
    Ok(stats.relabel(Operation::Update, size_before, start.elapsed()))
}

/// Picks the stored name that `path` refers to.
fn find_target(
    archive: &Archive,
    is_dir: bool,
    file_name: &str,
    parent_name: Option<&str>,
) -> Option<EntryName> {
    if is_dir {
        let name = EntryName::new(file_name).ok()?;
        let present = archive
            .entries()
            .iter()
            .any(|entry| entry.name().dir_name() == Some(name.as_str()));
        return present.then_some(name);
    }

    let member = parent_name.and_then(|parent| EntryName::in_dir(parent, file_name).ok());
    let bare = EntryName::new(file_name).ok();
    member
        .into_iter()
        .chain(bare)
        .find(|candidate| archive.entry(candidate.as_str()).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::write::{WriteOptions, Writer};
    use tempfile::TempDir;

    fn contents(archive: &Path, name: &str) -> Vec<u8> {
        let archive = Archive::open(archive, None).unwrap();
        let entry = archive.entry(name).unwrap();
        archive.decode_entry(entry).unwrap()
    }

    #[test]
    fn test_update_standalone_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.txt");
        fs::write(&file, b"version one").unwrap();
        let archive = temp.path().join("a.bin");
        Writer::create(&archive).file(&file).finish().unwrap();

        fs::write(&file, b"version two, longer").unwrap();
        let stats = update(&archive, &file, None).unwrap();
        assert_eq!(stats.operation, Operation::Update);
        assert_eq!(stats.entries, 1);
        assert_eq!(contents(&archive, "notes.txt"), b"version two, longer");
    }

    #[test]
    fn test_update_directory_member_keeps_prefix() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("docs");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("one.txt"), b"old").unwrap();
        let archive = temp.path().join("a.bin");
        Writer::create(&archive)
            .options(WriteOptions::new().codec(Codec::Rle))
            .dir(&dir)
            .finish()
            .unwrap();

        fs::write(dir.join("one.txt"), b"new!").unwrap();
        update(&archive, dir.join("one.txt"), None).unwrap();
        assert_eq!(contents(&archive, "docs/one.txt"), b"new!");
        assert!(Archive::open(&archive, None).unwrap().entry("one.txt").is_none());
    }

    #[test]
    fn test_update_unknown_entry() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, b"a").unwrap();
        let other = temp.path().join("b.txt");
        fs::write(&other, b"b").unwrap();
        let archive = temp.path().join("a.bin");
        Writer::create(&archive).file(&file).finish().unwrap();

        let err = update(&archive, &other, None).unwrap_err();
        assert!(matches!(err, Error::EntryNotFound { .. }));
    }

    #[test]
    fn test_update_missing_input_keeps_entry() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, b"keep me").unwrap();
        let archive = temp.path().join("a.bin");
        Writer::create(&archive).file(&file).finish().unwrap();

        fs::remove_file(&file).unwrap();
        let err = update(&archive, &file, None).unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
        assert_eq!(contents(&archive, "a.txt"), b"keep me");
    }
}
