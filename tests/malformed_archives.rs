//! Tests for malformed and corrupted container handling.
//!
//! These tests hand-build container bytes and verify that parsing rejects
//! them with the right error before any untrusted field is acted on.

mod common;

use std::io::Cursor;

use pck::{Archive, Error};

/// Builds the 88-byte fixed header.
fn header(magic: &[u8; 4], format_version: i32, entry_count: i32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(88);
    buf.extend_from_slice(magic);
    buf.extend_from_slice(&format_version.to_le_bytes());
    buf.extend_from_slice(&3i32.to_le_bytes());
    buf.extend_from_slice(&2i32.to_le_bytes());
    buf.extend_from_slice(&4i32.to_le_bytes());
    buf.extend_from_slice(&[0u8; 64]);
    buf.extend_from_slice(&entry_count.to_le_bytes());
    buf
}

/// Builds one table record with raw path bytes.
fn record(path: &[u8], offset: i64, size: i64) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(path.len() as i32).to_le_bytes());
    buf.extend_from_slice(path);
    buf.extend_from_slice(&offset.to_le_bytes());
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend_from_slice(&[0u8; 16]);
    buf
}

fn open(data: Vec<u8>) -> pck::Result<Archive<Cursor<Vec<u8>>>> {
    Archive::open(Cursor::new(data))
}

#[test]
fn test_empty_input_fails() {
    let err = open(Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}

#[test]
fn test_wrong_magic_fails_before_anything_else() {
    // Valid everywhere except the magic; parsing must stop at the magic.
    let data = header(b"ZIPX", 1, 0);
    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
    assert!(err.is_format_error());
}

#[test]
fn test_wrong_format_version_fails() {
    let data = header(b"GDPC", 2, 0);
    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_format_version_checked_before_entry_count() {
    // A wild entry count must not matter when the format version is wrong.
    let data = header(b"GDPC", 99, i32::MAX);
    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_truncated_header_fails() {
    let mut data = header(b"GDPC", 1, 0);
    data.truncate(50);
    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}

#[test]
fn test_truncated_table_fails() {
    let mut data = header(b"GDPC", 1, 1);
    let mut rec = record(b"res://a.txt", 0, 0);
    rec.truncate(rec.len() - 8);
    data.extend(rec);

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}

#[test]
fn test_entry_count_larger_than_table_fails() {
    let mut data = header(b"GDPC", 1, 5);
    data.extend(record(b"res://only.txt", 0, 0));

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}

#[test]
fn test_negative_entry_count_fails() {
    let data = header(b"GDPC", 1, -1);
    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_negative_path_length_fails() {
    let mut data = header(b"GDPC", 1, 1);
    data.extend_from_slice(&(-20i32).to_le_bytes());

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_non_utf8_path_fails() {
    let mut data = header(b"GDPC", 1, 1);
    data.extend(record(&[0xFF, 0xFE, 0xFD], 0, 0));

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_duplicate_paths_in_table_fail() {
    let mut data = header(b"GDPC", 1, 2);
    data.extend(record(b"res://same.txt", 0, 0));
    data.extend(record(b"res://same.txt", 0, 0));

    let err = open(data).unwrap_err();
    assert!(
        matches!(err, Error::DuplicateEntry { ref path } if path == "res://same.txt"),
        "got {err:?}"
    );
}

#[test]
fn test_nul_padded_paths_are_trimmed_and_deduplicated() {
    // Two paths that differ only in NUL padding collide after trimming.
    let mut data = header(b"GDPC", 1, 2);
    data.extend(record(b"res://same.txt", 0, 0));
    data.extend(record(b"res://same.txt\0\0\0\0", 0, 0));

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::DuplicateEntry { .. }), "got {err:?}");
}

#[test]
fn test_negative_offset_fails() {
    let mut data = header(b"GDPC", 1, 1);
    data.extend(record(b"res://a.txt", -1, 0));

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_negative_size_fails() {
    let mut data = header(b"GDPC", 1, 1);
    data.extend(record(b"res://a.txt", 0, -1));

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_entry_extending_past_end_fails() {
    let mut data = header(b"GDPC", 1, 1);
    let content_offset = (data.len() + record(b"res://a.txt", 0, 0).len()) as i64;
    data.extend(record(b"res://a.txt", content_offset, 100));
    data.extend_from_slice(b"short"); // only 5 content bytes, table claims 100

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_hand_built_pack_parses() {
    // Sanity check that the hand-built layout above matches the writer's.
    // The path carries NUL padding, which must not survive parsing.
    let padded_path = b"res://a.txt\0\0";
    let mut data = header(b"GDPC", 1, 1);
    let content_offset = (data.len() + record(padded_path, 0, 0).len()) as i64;
    data.extend(record(padded_path, content_offset, 2));
    data.extend_from_slice(b"hi");

    let mut archive = open(data).unwrap();
    let entry = archive.get_entry("res://a.txt").unwrap();
    assert_eq!(entry.size, 2);
    assert!(!entry.has_checksum());
    assert_eq!(archive.read_to_vec("res://a.txt").unwrap(), b"hi");
}

#[test]
fn test_garbage_after_magic_fails() {
    let mut data = b"GDPC".to_vec();
    data.extend_from_slice(&[0xAA; 200]);

    let err = open(data).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)), "got {err:?}");
}

#[test]
fn test_writer_output_matches_hand_layout() {
    let bytes = common::pack_bytes(&[("res://a.txt", b"hi")]);

    // Header prefix
    assert_eq!(&bytes[0..4], b"GDPC");
    assert_eq!(i32::from_le_bytes(bytes[4..8].try_into().unwrap()), 1);
    // Default engine version triple
    assert_eq!(i32::from_le_bytes(bytes[8..12].try_into().unwrap()), 3);
    assert_eq!(i32::from_le_bytes(bytes[12..16].try_into().unwrap()), 2);
    assert_eq!(i32::from_le_bytes(bytes[16..20].try_into().unwrap()), 4);
    // Reserved region stays zero
    assert!(bytes[20..84].iter().all(|&b| b == 0));
    // Entry count
    assert_eq!(i32::from_le_bytes(bytes[84..88].try_into().unwrap()), 1);
    // First record: path length + path
    let path = b"res://a.txt";
    assert_eq!(
        i32::from_le_bytes(bytes[88..92].try_into().unwrap()),
        path.len() as i32
    );
    assert_eq!(&bytes[92..92 + path.len()], path);
    // Content block sits at the backpatched offset
    let tail = 92 + path.len();
    let offset = i64::from_le_bytes(bytes[tail..tail + 8].try_into().unwrap()) as usize;
    let size = i64::from_le_bytes(bytes[tail + 8..tail + 16].try_into().unwrap()) as usize;
    assert_eq!(size, 2);
    assert_eq!(&bytes[offset..offset + size], b"hi");
}
