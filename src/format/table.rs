//! Entry table codec: parsing, placeholder emission, and backpatching.
//!
//! The table is written in two phases. When a pack is created the content
//! lengths are not yet known, so each record's 32-byte tail (offset, size,
//! digest) is first emitted as zeros and its stream position recorded; after
//! the content pass those positions are revisited and the real values
//! written in place.

use std::collections::HashSet;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::{Error, Result};

use super::ENTRY_TAIL_SIZE;
use super::reader::{read_bytes, read_i32_le, read_i64_le};

/// Maximum accepted path length in bytes.
///
/// This bounds the allocation made while parsing a record, so a corrupt or
/// malicious length field cannot demand an arbitrarily large buffer. 32 KiB
/// is far above any real resource path.
pub const MAX_PATH_LENGTH: usize = 32768;

/// One parsed table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Entry path, NUL padding trimmed.
    pub path: String,
    /// Content offset within the container.
    pub offset: i64,
    /// Content length in bytes.
    pub size: i64,
    /// Stored MD5 digest, all zero when absent.
    pub checksum: [u8; 16],
}

/// Parses `count` table records.
///
/// Paths are decoded as UTF-8 with trailing NUL padding trimmed. Offsets and
/// sizes must be non-negative, and paths must be unique and non-empty.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] for malformed records,
/// [`Error::DuplicateEntry`] when two records share a path; I/O errors
/// (including truncation) propagate unchanged.
pub fn parse_table<R: Read>(r: &mut R, count: u32) -> Result<Vec<RawEntry>> {
    // A bogus count fails on EOF long before the preallocation matters.
    let mut entries = Vec::with_capacity(count.min(1024) as usize);
    let mut seen = HashSet::with_capacity(entries.capacity());

    for _ in 0..count {
        let path_len = read_i32_le(r)?;
        if path_len < 0 || path_len as usize > MAX_PATH_LENGTH {
            return Err(Error::InvalidFormat(format!(
                "entry path length out of range: {}",
                path_len
            )));
        }

        let path_bytes = read_bytes(r, path_len as usize)?;
        let path = String::from_utf8(path_bytes)
            .map_err(|_| Error::InvalidFormat("entry path is not valid UTF-8".into()))?;
        let path = path.trim_end_matches('\0').to_string();
        if path.is_empty() {
            return Err(Error::InvalidFormat("empty entry path".into()));
        }

        let offset = read_i64_le(r)?;
        let size = read_i64_le(r)?;
        let mut checksum = [0u8; 16];
        r.read_exact(&mut checksum)?;

        if offset < 0 || size < 0 {
            return Err(Error::InvalidFormat(format!(
                "entry '{}' has negative extent: offset {}, size {}",
                path, offset, size
            )));
        }

        if !seen.insert(path.clone()) {
            return Err(Error::DuplicateEntry { path });
        }

        entries.push(RawEntry {
            path,
            offset,
            size,
            checksum,
        });
    }

    Ok(entries)
}

/// Writes one pending entry's table record with a zeroed 32-byte tail.
///
/// Returns the stream position of the tail, to be passed to
/// [`backpatch_extent`] and [`backpatch_checksum`] once the real values are
/// known.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path does not fit the table's
/// length field; I/O errors propagate unchanged.
pub fn write_placeholder<W: Write + Seek>(w: &mut W, path: &str) -> Result<u64> {
    let path_bytes = path.as_bytes();
    if path_bytes.len() > MAX_PATH_LENGTH {
        return Err(Error::InvalidPath(format!(
            "path exceeds maximum length of {} bytes",
            MAX_PATH_LENGTH
        )));
    }

    w.write_all(&(path_bytes.len() as i32).to_le_bytes())?;
    w.write_all(path_bytes)?;

    let slot = w.stream_position()?;
    w.write_all(&[0u8; ENTRY_TAIL_SIZE as usize])?;
    Ok(slot)
}

/// Overwrites the offset and size fields of a previously written tail.
///
/// The digest bytes after them are left untouched.
///
/// # Errors
///
/// I/O errors propagate unchanged.
pub fn backpatch_extent<W: Write + Seek>(w: &mut W, slot: u64, offset: u64, size: u64) -> Result<()> {
    w.seek(SeekFrom::Start(slot))?;
    w.write_all(&(offset as i64).to_le_bytes())?;
    w.write_all(&(size as i64).to_le_bytes())?;
    Ok(())
}

/// Overwrites the digest field of a previously written tail.
///
/// # Errors
///
/// I/O errors propagate unchanged.
pub fn backpatch_checksum<W: Write + Seek>(w: &mut W, slot: u64, digest: &[u8; 16]) -> Result<()> {
    w.seek(SeekFrom::Start(slot + 16))?;
    w.write_all(digest)?;
    Ok(())
}
