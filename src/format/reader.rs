//! Low-level little-endian reading utilities for PCK parsing.

use std::io::{self, Read};

/// Reads a little-endian i32 from a reader.
///
/// # Errors
///
/// Returns an error if the reader encounters EOF or an I/O error.
pub fn read_i32_le<R: Read>(r: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Reads a little-endian i64 from a reader.
///
/// # Errors
///
/// Returns an error if the reader encounters EOF or an I/O error.
pub fn read_i64_le<R: Read>(r: &mut R) -> io::Result<i64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

/// Reads exactly `len` bytes from a reader into a new buffer.
///
/// Callers must validate `len` against a format-level bound first; this
/// function allocates the full buffer up front.
///
/// # Errors
///
/// Returns an error if the reader encounters EOF or an I/O error.
pub fn read_bytes<R: Read>(r: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}
