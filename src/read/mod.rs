//! Archive reading API for PCK resource packs.
//!
//! This module provides the public API for reading PCK containers:
//! opening, listing and looking up entries, and reading entry content
//! through bounded views.
//!
//! # Example
//!
//! ```rust,ignore
//! use pck::Archive;
//!
//! let mut archive = Archive::open_path("game.pck")?;
//!
//! for entry in archive.entries() {
//!     println!("{}: {} bytes", entry.path, entry.size);
//! }
//!
//! if let Some(mut stream) = archive.open_entry("res://icon.png") {
//!     // stream implements Read + Seek, bounded to the entry's content
//! }
//! ```

mod entry;
mod entry_stream;
mod extraction;

pub use entry::Entry;
pub use entry_stream::EntryStream;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::format::PckVersion;
use crate::format::header::PckHeader;
use crate::format::table;
use crate::{Error, Result};

/// A parsed, read-only PCK archive.
///
/// The header and entry table are parsed once at open time; the table is
/// immutable afterwards, while content may be read repeatedly through
/// [`EntryStream`] views.
///
/// The archive owns its stream and releases it on drop. Callers that need
/// the stream back (the "leave open" pattern) use
/// [`into_inner`](Self::into_inner), or open the archive over `&mut R` in
/// the first place.
#[derive(Debug)]
pub struct Archive<R> {
    pub(crate) reader: R,
    version: PckVersion,
    entries: Vec<Entry>,
    /// Path → index into `entries`.
    index: HashMap<String, usize>,
}

impl Archive<BufReader<File>> {
    /// Opens an archive from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid
    /// PCK container.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::open(BufReader::new(file))
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Opens an archive from a seekable reader.
    ///
    /// The magic number and format version are validated before any other
    /// field is trusted, then the full entry table is parsed. Every entry's
    /// content region is checked to lie within the stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the magic, format version, or
    /// table is invalid, [`Error::DuplicateEntry`] if two entries share a
    /// path; I/O errors propagate unchanged.
    pub fn open(mut reader: R) -> Result<Self> {
        let header = PckHeader::parse(&mut reader)?;
        let raw = table::parse_table(&mut reader, header.entry_count)?;

        let stream_len = reader.seek(SeekFrom::End(0))?;

        let mut entries = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());
        for record in raw {
            // parse_table guarantees non-negative extents and unique paths
            let offset = record.offset as u64;
            let size = record.size as u64;
            if offset.checked_add(size).is_none_or(|end| end > stream_len) {
                return Err(Error::InvalidFormat(format!(
                    "entry '{}' extends past end of pack: offset {} + size {} > length {}",
                    record.path, offset, size, stream_len
                )));
            }

            index.insert(record.path.clone(), entries.len());
            entries.push(Entry {
                path: record.path,
                offset,
                size,
                checksum: record.checksum,
            });
        }

        log::debug!(
            "opened PCK archive: {} entries, engine version {}",
            entries.len(),
            header.version
        );

        Ok(Self {
            reader,
            version: header.version,
            entries,
            index,
        })
    }

    /// Returns the engine version triple recorded in the header.
    pub fn version(&self) -> PckVersion {
        self.version
    }

    /// Returns all entries in table order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries in the archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds an entry by its exact resource path.
    ///
    /// A missing path is a normal outcome and yields `None`, never an
    /// error.
    pub fn get_entry(&self, path: &str) -> Option<&Entry> {
        self.index.get(path).map(|&i| &self.entries[i])
    }

    /// Opens a bounded view over one entry's content.
    ///
    /// Returns `None` when no entry has the given path. The view borrows
    /// the archive's reader mutably, so only one view can exist at a time;
    /// see [`EntryStream`] for the shared-cursor constraint this enforces.
    pub fn open_entry(&mut self, path: &str) -> Option<EntryStream<'_, R>> {
        let &i = self.index.get(path)?;
        let (offset, size) = (self.entries[i].offset, self.entries[i].size);
        Some(EntryStream::new(&mut self.reader, offset, size))
    }

    /// Consumes the archive and returns the underlying reader.
    ///
    /// Use this when the stream must outlive the archive; otherwise the
    /// stream is released when the archive is dropped.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Looks up an entry's content region, reporting absence as an error.
    /// Used by the path-taking convenience operations.
    pub(crate) fn extent(&self, path: &str) -> Result<(u64, u64)> {
        self.get_entry(path)
            .map(|e| (e.offset, e.size))
            .ok_or_else(|| Error::EntryNotFound {
                path: path.to_string(),
            })
    }
}
