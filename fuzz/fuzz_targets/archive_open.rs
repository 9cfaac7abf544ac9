//! Fuzz target for Archive::open with arbitrary byte input.
//!
//! This target exercises the header and table parsing code with potentially
//! malformed or adversarial input. The goal is to find panics, hangs, or
//! unbounded allocations in the parsing logic.
//!
//! Run with: cargo +nightly fuzz run archive_open

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let cursor = Cursor::new(data.to_vec());

    // We don't care about the result - we're looking for panics or hangs
    if let Ok(mut archive) = pck::Archive::open(cursor) {
        for entry in archive.entries() {
            let _ = entry.path.as_str();
            let _ = entry.size;
            let _ = entry.has_checksum();
            let _ = entry.relative_path();
        }

        // Read back whatever content the table points at
        let paths: Vec<String> = archive.entries().iter().map(|e| e.path.clone()).collect();
        for path in paths {
            let _ = archive.read_to_vec(&path);
        }
    }
});
