//! Deleting entries by rebuilding the archive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tempfile::TempDir;

use crate::crypto::Password;
use crate::read::Archive;
use crate::stats::{Operation, OperationStats};
use crate::write::{WriteOptions, Writer};
use crate::{EntryName, Error, Result};

/// Removes a file or a whole directory from an archive.
///
/// `name` is either a full entry name (`notes.txt`, `docs/one.txt`) or the
/// name of a compressed directory (`docs`), which removes all its members.
/// The remaining entries are compressed again into a fresh archive with the
/// same codec, unit length and password and a new key. Standalone files come
/// first in the rebuilt archive, followed by directories, each in name order.
///
/// # Errors
///
/// - Any error of [`Archive::open`]
/// - [`Error::EntryNotFound`] if nothing in the archive is called `name`
pub fn delete(
    archive: impl AsRef<Path>,
    name: &str,
    password: Option<&Password>,
) -> Result<OperationStats> {
    delete_with_scratch_in(archive.as_ref(), name, password, &std::env::temp_dir())
}

/// Runs [`delete`] with its scratch directory created below `scratch_parent`.
pub(crate) fn delete_with_scratch_in(
    archive: &Path,
    name: &str,
    password: Option<&Password>,
    scratch_parent: &Path,
) -> Result<OperationStats> {
    let start = Instant::now();
    let opened = Archive::open(archive, password)?;
    let size_before = fs::metadata(archive)?.len();

    let scratch = tempfile::Builder::new()
        .prefix("binarc-")
        .tempdir_in(scratch_parent)?;
    let rebuilt = rebuild_without(&opened, &scratch, name, password);
    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        log::warn!(
            "failed to remove scratch directory {}: {e}",
            scratch_path.display()
        );
    }

    let stats = rebuilt?;
    log::debug!("deleted '{name}' from {}", archive.display());
    Ok(stats.relabel(Operation::Delete, size_before, start.elapsed()))
}

fn rebuild_without(
    archive: &Archive,
    scratch: &TempDir,
    name: &str,
    password: Option<&Password>,
) -> Result<OperationStats> {
    let not_found = || Error::EntryNotFound {
        path: name.to_string(),
    };
    let name = EntryName::new(name).map_err(|_| not_found())?;

    let root = scratch.path().join("contents");
    archive.extract_to(&root)?;

    let target = root.join(name.as_str());
    let metadata = match fs::symlink_metadata(&target) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(e.into()),
    };
    if metadata.is_dir() {
        fs::remove_dir_all(&target)?;
    } else {
        fs::remove_file(&target)?;
    }

    let (files, dirs) = top_level(&root)?;
    let options = WriteOptions::new()
        .codec(archive.codec())
        .unit_len(archive.unit_len().get())
        .password(password.cloned().unwrap_or_default())
        .overwrite(true);
    Writer::create(archive.path())
        .options(options)
        .files(files)
        .dirs(dirs)
        .finish()
}

/// Lists the files and directories directly inside `root`, each sorted.
fn top_level(root: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        } else {
            files.push(entry.path());
        }
    }
    files.sort();
    dirs.sort();
    Ok((files, dirs))
}
