//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test
//! file compiles as a separate crate and may only use a subset of these
//! helpers.

#![allow(dead_code)]

use std::io::Cursor;

use pck::{Archive, PackOptions, PackResult, Packer};

/// Packs `entries` into an in-memory container with the given options.
///
/// Returns both the container bytes and the `PackResult` metadata so
/// callers can verify either.
pub fn pack_with_result(
    options: PackOptions,
    entries: &[(&str, &[u8])],
) -> pck::Result<(Vec<u8>, PackResult)> {
    let mut packer = Packer::new(Cursor::new(Vec::new())).options(options);
    for (path, data) in entries {
        packer.add_bytes(*path, data.to_vec())?;
    }
    let result = packer.pack()?;
    Ok((packer.into_inner().into_inner(), result))
}

/// Packs `entries` with default options and returns the container bytes.
pub fn pack_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let (bytes, _result) =
        pack_with_result(PackOptions::default(), entries).expect("failed to pack test entries");
    bytes
}

/// Opens packed bytes and asserts every expected entry is present with
/// matching size and content.
pub fn verify_contents(bytes: &[u8], entries: &[(&str, &[u8])]) {
    let mut archive = Archive::open(Cursor::new(bytes.to_vec())).expect("failed to open pack");
    assert_eq!(archive.len(), entries.len());

    for (path, data) in entries {
        let entry = archive
            .get_entry(path)
            .unwrap_or_else(|| panic!("missing entry {path}"));
        assert_eq!(entry.size, data.len() as u64, "size mismatch for {path}");

        let content = archive.read_to_vec(path).expect("failed to read entry");
        assert_eq!(&content, data, "content mismatch for {path}");
    }
}
