//! Appending entries to an existing archive.

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::crypto::Password;
use crate::read::Archive;
use crate::stats::{Operation, OperationStats};
use crate::write::{
    EntryInput, check_unique_names, check_unit_len, commit, encode_inputs, entry_count,
};
use crate::Result;

/// Adds a file, or every file of a directory, to an existing archive.
///
/// The new entries are encoded with the archive's codec and unit length and
/// appended after the existing ones. The archive key is kept.
///
/// # Errors
///
/// - Any error of [`Archive::open`]
/// - [`Error::InputNotFound`](crate::Error::InputNotFound) if `path` does not exist
/// - [`Error::InvalidUnitLength`](crate::Error::InvalidUnitLength) if an
///   RLE archive's unit length is longer than a new file
/// - [`Error::EntryExists`](crate::Error::EntryExists) if a new entry name is
///   already taken
pub fn add(
    archive: impl AsRef<Path>,
    path: impl AsRef<Path>,
    password: Option<&Password>,
) -> Result<OperationStats> {
    let start = Instant::now();
    let opened = Archive::open(archive.as_ref(), password)?;
    let size_before = fs::metadata(opened.path())?.len();
    let inputs = EntryInput::from_path(path)?;
    let stats = append_inputs(opened, &inputs)?;
    Ok(stats.relabel(Operation::Add, size_before, start.elapsed()))
}

/// Appends `inputs` to an opened archive and writes it back in place.
pub(crate) fn append_inputs(archive: Archive, inputs: &[EntryInput]) -> Result<OperationStats> {
    let path = archive.path().to_path_buf();
    let (mut header, mut payload, entries) = archive.into_parts();

    if header.codec.uses_unit_length() {
        check_unit_len(inputs, header.unit_len.get())?;
    }
    check_unique_names(
        entries
            .iter()
            .map(|entry| entry.name())
            .chain(inputs.iter().map(|input| &input.name)),
    )?;

    let input_bytes = encode_inputs(header.codec, header.unit_len, inputs, &mut payload)?;
    header.entry_count = entry_count(entries.len() + inputs.len())?;
    let entries = header.entry_count;
    let archive_bytes = commit(&path, header, &payload, true)?;

    log::debug!(
        "appended {} entries to {} ({} total)",
        inputs.len(),
        path.display(),
        entries
    );
    let mut stats = OperationStats::new(Operation::Add);
    stats.input_bytes = input_bytes;
    stats.payload_bytes = payload.len() as u64;
    stats.archive_bytes = archive_bytes;
    stats.entries = entries;
    Ok(stats)
}
