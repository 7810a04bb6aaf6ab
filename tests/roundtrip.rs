//! Round-trip tests: compress with both codecs, extract, and compare.

use binarc::{Archive, Codec, Password, WriteOptions, Writer};

mod common;

use common::{Fixture, random_bytes, read_tree, skewed_bytes};

fn roundtrip(codec: Codec, unit_len: u16) {
    let fx = Fixture::new();
    let text = skewed_bytes(4096, 1);
    let noise = random_bytes(1500, 2);
    let a = fx.write_file("text.txt", &text);
    let b = fx.write_file("noise.bin", &noise);
    let dir = fx.write_dir(
        "docs",
        &[("readme.md", b"# readme\n\nhello hello hello"), ("blank.txt", b"        ")],
    );

    let password = Password::new("pw1");
    Writer::create(fx.archive())
        .options(
            WriteOptions::new()
                .codec(codec)
                .unit_len(unit_len)
                .password(password.clone()),
        )
        .files([&a, &b])
        .dir(&dir)
        .finish()
        .expect("compress failed");

    let out = fx.join("out");
    let stats = binarc::extract(fx.archive(), &out, Some(&password)).expect("extract failed");
    assert_eq!(stats.entries, 4);

    let tree = read_tree(&out);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree["text.txt"], text);
    assert_eq!(tree["noise.bin"], noise);
    assert_eq!(tree["docs/readme.md"], b"# readme\n\nhello hello hello");
    assert_eq!(tree["docs/blank.txt"], b"        ");
}

// =============================================================================
// Codec Round-Trips
// =============================================================================

#[test]
fn test_huffman_roundtrip() {
    roundtrip(Codec::Huffman, 1);
}

#[test]
fn test_rle_roundtrip_unit_1() {
    roundtrip(Codec::Rle, 1);
}

#[test]
fn test_rle_roundtrip_unit_3() {
    roundtrip(Codec::Rle, 3);
}

#[test]
fn test_rle_roundtrip_unit_equal_to_smallest_file() {
    roundtrip(Codec::Rle, 8);
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_huffman_single_symbol_file() {
    let fx = Fixture::new();
    let file = fx.write_file("same.txt", &[b'z'; 1000]);
    binarc::compress(fx.archive(), [&file], Vec::<&str>::new(), WriteOptions::new()).unwrap();

    let archive = Archive::open(fx.archive(), None).unwrap();
    let entry = archive.entry("same.txt").unwrap();
    assert_eq!(archive.decode_entry(entry).unwrap(), vec![b'z'; 1000]);
}

#[test]
fn test_huffman_empty_file() {
    let fx = Fixture::new();
    let file = fx.write_file("empty", b"");
    binarc::compress(fx.archive(), [&file], Vec::<&str>::new(), WriteOptions::new()).unwrap();

    let out = fx.join("out");
    binarc::extract(fx.archive(), &out, None).unwrap();
    assert_eq!(std::fs::read(out.join("empty")).unwrap(), b"");
}

#[test]
fn test_huffman_comma_byte() {
    let fx = Fixture::new();
    let data = b",,,a,b,,c".to_vec();
    let file = fx.write_file("csv", &data);
    binarc::compress(fx.archive(), [&file], Vec::<&str>::new(), WriteOptions::new()).unwrap();

    let out = fx.join("out");
    binarc::extract(fx.archive(), &out, None).unwrap();
    assert_eq!(std::fs::read(out.join("csv")).unwrap(), data);
}

#[test]
fn test_device_like_file_names() {
    let fx = Fixture::new();
    let file = fx.write_file("aux.c", b"int main(void) { return 0; }\n");
    let dir = fx.write_dir("include", &[("con.h", b"#pragma once\n"), ("nul.txt", b"")]);
    binarc::compress(fx.archive(), [&file], [&dir], WriteOptions::new()).unwrap();

    let out = fx.join("out");
    binarc::extract(fx.archive(), &out, None).unwrap();
    let tree = read_tree(&out);
    assert_eq!(tree["aux.c"], b"int main(void) { return 0; }\n");
    assert_eq!(tree["include/con.h"], b"#pragma once\n");
    assert!(tree["include/nul.txt"].is_empty());
}

#[test]
fn test_all_byte_values() {
    let fx = Fixture::new();
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 5).collect();
    let file = fx.write_file("bytes", &data);
    for codec in [Codec::Huffman, Codec::Rle] {
        binarc::compress(
            fx.archive(),
            [&file],
            Vec::<&str>::new(),
            WriteOptions::new().codec(codec).unit_len(2).overwrite(true),
        )
        .unwrap();
        let out = fx.join(&format!("out-{codec}"));
        binarc::extract(fx.archive(), &out, None).unwrap();
        assert_eq!(std::fs::read(out.join("bytes")).unwrap(), data);
    }
}

#[test]
fn test_long_rle_run_is_split() {
    let fx = Fixture::new();
    let data = vec![7u8; 70_000 * 2 + 1];
    let file = fx.write_file("long", &data);
    binarc::compress(
        fx.archive(),
        [&file],
        Vec::<&str>::new(),
        WriteOptions::new().codec(Codec::Rle).unit_len(2),
    )
    .unwrap();

    let out = fx.join("out");
    binarc::extract(fx.archive(), &out, None).unwrap();
    assert_eq!(std::fs::read(out.join("long")).unwrap(), data);
}

#[test]
fn test_empty_archive_roundtrip() {
    let fx = Fixture::new();
    let stats = binarc::compress(
        fx.archive(),
        Vec::<&str>::new(),
        Vec::<&str>::new(),
        WriteOptions::new(),
    )
    .unwrap();
    assert_eq!(stats.entries, 0);
    assert!(binarc::list(fx.archive(), None).unwrap().is_empty());

    let out = fx.join("out");
    binarc::extract(fx.archive(), &out, None).unwrap();
    assert!(read_tree(&out).is_empty());
}

// =============================================================================
// Listing and Statistics
// =============================================================================

#[test]
fn test_list_reports_entries_in_order() {
    let fx = Fixture::new();
    let b = fx.write_file("b.txt", b"bbb");
    let a = fx.write_file("a.txt", b"aaa");
    let dir = fx.write_dir("d", &[("z", b"zz"), ("y", b"yy")]);
    binarc::compress(fx.archive(), [&b, &a], [&dir], WriteOptions::new()).unwrap();

    let listing = binarc::list(fx.archive(), None).unwrap();
    let names: Vec<&str> = listing.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["b.txt", "a.txt", "d/y", "d/z"]);
    assert!(listing.iter().all(|e| e.codec == Codec::Huffman));
    assert!(listing[2].is_dir && !listing[0].is_dir);
}

#[test]
fn test_compress_stats_text() {
    let fx = Fixture::new();
    let file = fx.write_file("data", &skewed_bytes(2000, 9));
    let stats = binarc::compress(fx.archive(), [&file], Vec::<&str>::new(), WriteOptions::new())
        .unwrap();
    assert_eq!(stats.input_bytes, 2000);
    assert_eq!(
        stats.archive_bytes,
        std::fs::metadata(fx.archive()).unwrap().len()
    );

    let text = stats.to_string();
    assert!(text.starts_with("Compression Time: "));
    assert!(text.contains("Files Size Before: 2000 bytes"));
    assert!(text.contains(&format!("Archive Size: {} bytes", stats.archive_bytes)));
}
