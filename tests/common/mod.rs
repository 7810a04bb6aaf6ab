//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// A scratch directory holding test inputs, archives and extraction targets.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Returns the fixture root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns a path below the fixture root.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a standalone input file and returns its path.
    pub fn write_file(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, data).expect("Failed to write input file");
        path
    }

    /// Creates an input directory with the given files and returns its path.
    pub fn write_dir(&self, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
        let dir = self.join(name);
        fs::create_dir_all(&dir).expect("Failed to create input dir");
        for (file, data) in files {
            fs::write(dir.join(file), data).expect("Failed to write dir member");
        }
        dir
    }

    /// Returns the default archive path of the fixture.
    pub fn archive(&self) -> PathBuf {
        self.join("archive.bin")
    }
}

/// Reads an extracted tree (one directory level deep) into a sorted map of
/// `name` or `dir/name` to contents.
pub fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut tree = BTreeMap::new();
    for entry in fs::read_dir(root).expect("Failed to read dir") {
        let entry = entry.expect("Failed to read dir entry");
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            for member in fs::read_dir(entry.path()).expect("Failed to read subdir") {
                let member = member.expect("Failed to read subdir entry");
                let file = member.file_name().to_string_lossy().into_owned();
                tree.insert(
                    format!("{name}/{file}"),
                    fs::read(member.path()).expect("Failed to read file"),
                );
            }
        } else {
            tree.insert(name, fs::read(entry.path()).expect("Failed to read file"));
        }
    }
    tree
}

/// Generates reproducible random bytes.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.r#gen()).collect()
}

/// Generates reproducible bytes drawn from a small alphabet, so both codecs
/// find structure to exploit.
pub fn skewed_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let alphabet = b"aaaaaaaabbbbccd \n";
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        let byte = alphabet[rng.gen_range(0..alphabet.len())];
        let run = rng.gen_range(1..6).min(len - data.len());
        data.extend(std::iter::repeat_n(byte, run));
    }
    data
}
