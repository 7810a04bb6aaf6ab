//! Tests for validation-before-write and atomic replacement of archives.

use binarc::{Archive, Codec, Error, ErrorKind, WriteOptions};

mod common;

use common::Fixture;

fn dir_listing(fx: &Fixture) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(fx.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Validation Before Writing
// =============================================================================

#[test]
fn test_unit_len_larger_than_smallest_file() {
    let fx = Fixture::new();
    let big = fx.write_file("big", &[1u8; 100]);
    let small = fx.write_file("small", b"abc");
    let err = binarc::compress(
        fx.archive(),
        [&big, &small],
        Vec::<&str>::new(),
        WriteOptions::new().codec(Codec::Rle).unit_len(4),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidUnitLength { unit_len: 4, .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert!(!fx.archive().exists());
}

#[test]
fn test_unit_len_checked_against_directory_members() {
    let fx = Fixture::new();
    let big = fx.write_file("big", &[1u8; 100]);
    let dir = fx.write_dir("d", &[("tiny", b"x")]);
    let err = binarc::compress(
        fx.archive(),
        [&big],
        [&dir],
        WriteOptions::new().codec(Codec::Rle).unit_len(2),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidUnitLength { .. }));
}

#[test]
fn test_zero_unit_len() {
    let fx = Fixture::new();
    let file = fx.write_file("f", b"data");
    let err = binarc::compress(
        fx.archive(),
        [&file],
        Vec::<&str>::new(),
        WriteOptions::new().codec(Codec::Rle).unit_len(0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}

#[test]
fn test_missing_directory() {
    let fx = Fixture::new();
    let err = binarc::compress(
        fx.archive(),
        Vec::<&str>::new(),
        [fx.join("nowhere")],
        WriteOptions::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InputNotFound { .. }));
    assert!(!fx.archive().exists());
}

#[test]
fn test_nested_directory_rejected() {
    let fx = Fixture::new();
    let dir = fx.write_dir("outer", &[("f", b"f")]);
    std::fs::create_dir(dir.join("inner")).unwrap();
    let err = binarc::compress(fx.archive(), Vec::<&str>::new(), [&dir], WriteOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test]
fn test_non_ascii_name_rejected() {
    let fx = Fixture::new();
    let file = fx.write_file("naïve.txt", b"x");
    let err = binarc::compress(fx.archive(), [&file], Vec::<&str>::new(), WriteOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidEntryName(_)));
}

// =============================================================================
// Overwrite and Atomic Replacement
// =============================================================================

#[test]
fn test_existing_archive_not_overwritten_by_default() {
    let fx = Fixture::new();
    let file = fx.write_file("f", b"first");
    binarc::compress(fx.archive(), [&file], Vec::<&str>::new(), WriteOptions::new()).unwrap();
    let before = std::fs::read(fx.archive()).unwrap();

    let err = binarc::compress(fx.archive(), [&file], Vec::<&str>::new(), WriteOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::ArchiveExists { .. }));
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(std::fs::read(fx.archive()).unwrap(), before);
}

#[test]
fn test_overwrite_replaces_archive() {
    let fx = Fixture::new();
    let first = fx.write_file("first", b"first");
    let second = fx.write_file("second", b"second");
    binarc::compress(fx.archive(), [&first], Vec::<&str>::new(), WriteOptions::new()).unwrap();
    binarc::compress(
        fx.archive(),
        [&second],
        Vec::<&str>::new(),
        WriteOptions::new().overwrite(true),
    )
    .unwrap();

    let archive = Archive::open(fx.archive(), None).unwrap();
    assert!(archive.entry("second").is_some());
    assert!(archive.entry("first").is_none());
}

#[test]
fn test_failed_overwrite_keeps_old_archive() {
    let fx = Fixture::new();
    let file = fx.write_file("f", b"keep me");
    binarc::compress(fx.archive(), [&file], Vec::<&str>::new(), WriteOptions::new()).unwrap();
    let before = std::fs::read(fx.archive()).unwrap();

    let err = binarc::compress(
        fx.archive(),
        [&file, &fx.join("missing")],
        Vec::<&str>::new(),
        WriteOptions::new().overwrite(true),
    )
    .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(std::fs::read(fx.archive()).unwrap(), before);
}

#[test]
fn test_no_temporary_files_left() {
    let fx = Fixture::new();
    let a = fx.write_file("a", b"aaa");
    let b = fx.write_file("b", b"bbb");
    binarc::compress(fx.archive(), [&a], Vec::<&str>::new(), WriteOptions::new()).unwrap();
    binarc::add(fx.archive(), &b, None).unwrap();
    binarc::delete(fx.archive(), "a", None).unwrap();
    std::fs::write(&b, b"bbbb").unwrap();
    binarc::update(fx.archive(), &b, None).unwrap();

    assert_eq!(dir_listing(&fx), vec!["a", "archive.bin", "b"]);
}

#[test]
fn test_duplicate_entry_names() {
    let fx = Fixture::new();
    let a = fx.write_file("a.txt", b"one");
    let dir = fx.write_dir("sub", &[("a.txt", b"two")]);
    let err = binarc::compress(
        fx.archive(),
        [&a, &dir.join("a.txt")],
        Vec::<&str>::new(),
        WriteOptions::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::EntryExists { .. }));
    assert!(!fx.archive().exists());
}
