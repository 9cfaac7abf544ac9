//! Archive writing API for PCK resource packs.
//!
//! This module provides the public API for creating PCK containers:
//! registering content sources under resource paths, then packing them into
//! a destination stream in a single multi-pass write.
//!
//! # Example
//!
//! ```rust,ignore
//! use pck::{PackOptions, Packer};
//!
//! let mut packer = Packer::create_path("game.pck")?
//!     .options(PackOptions::new().compute_checksum(true));
//!
//! packer.add_bytes("res://hello.txt", b"Hello".to_vec())?;
//! packer.add_file("res://icon.png", "assets/icon.png")?;
//!
//! let result = packer.pack()?;
//! println!("wrote {} entries", result.entries_written);
//! ```

mod options;
mod source;

pub use options::{PackOptions, PackResult};
pub use source::{ArchiveHandle, EntrySource};

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::checksum;
use crate::format::header::PckHeader;
use crate::format::table::{self, MAX_PATH_LENGTH};
use crate::read::{Archive, Entry, EntryStream};
use crate::{Error, Result};

use source::ReadSeek;

/// State of the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PackerState {
    /// Accepting new entries.
    Building,
    /// `pack` has run; the table and content are final.
    Packed,
}

/// A pending entry: its path, content source, and the table bookkeeping
/// filled in while `pack` runs.
struct PendingEntry<'a> {
    path: String,
    source: EntrySource<'a>,
    /// Stream position of this entry's 32-byte table tail.
    slot: u64,
    /// Resolved content offset, known after the content pass.
    offset: u64,
    /// Resolved content size, known after the content pass.
    size: u64,
}

/// Writes a new PCK container from registered content sources.
///
/// Entries are accumulated with the `add_*` family, then [`pack`] writes
/// the whole container in ordered passes: placeholder table, content
/// blocks, offset/size backpatch, and (optionally) an MD5 checksum pass.
/// Entries are written in the order they were added.
///
/// Once `pack` has run the packer is spent: adding more entries or packing
/// again fails with [`Error::Unsupported`]. The packer owns its destination
/// stream and releases it on drop; use [`into_inner`](Self::into_inner) to
/// take the stream back instead.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use pck::{Packer, Result};
///
/// fn main() -> Result<()> {
///     let mut packer = Packer::new(Cursor::new(Vec::new()));
///     packer.add_bytes("res://a.txt", b"hi".to_vec())?;
///     packer.pack()?;
///     let bytes = packer.into_inner().into_inner();
///     assert!(!bytes.is_empty());
///     Ok(())
/// }
/// ```
///
/// [`pack`]: Self::pack
pub struct Packer<'a, W> {
    sink: W,
    options: PackOptions,
    state: PackerState,
    pending: Vec<PendingEntry<'a>>,
    /// Fail-fast uniqueness index over pending paths.
    paths: HashSet<String>,
    /// Source archives registered with [`attach`](Self::attach).
    attached: Vec<Box<dyn ReadSeek + 'a>>,
}

impl<'a> Packer<'a, File> {
    /// Creates a packer writing to a new file at `path`.
    ///
    /// An existing file is truncated. The file is opened for reading as
    /// well, since the checksum pass reads back the content it just wrote.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl<'a, W> Packer<'a, W> {
    /// Creates a packer over an arbitrary destination stream.
    ///
    /// Nothing is written until [`pack`](Self::pack) runs.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            options: PackOptions::default(),
            state: PackerState::Building,
            pending: Vec::new(),
            paths: HashSet::new(),
            attached: Vec::new(),
        }
    }

    /// Sets the pack options.
    pub fn options(mut self, options: PackOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the number of pending entries.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no entries have been added.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Registers a pending entry.
    ///
    /// # Errors
    ///
    /// Fails fast, before `pack` ever runs, with
    /// [`Error::DuplicateEntry`] if the path was already added,
    /// [`Error::InvalidPath`] if the path is empty or too long, and
    /// [`Error::Unsupported`] if the packer has already packed.
    pub fn add(&mut self, path: impl Into<String>, source: EntrySource<'a>) -> Result<()> {
        self.ensure_building()?;

        let path = path.into();
        if path.is_empty() {
            return Err(Error::InvalidPath("empty entry path".into()));
        }
        if path.len() > MAX_PATH_LENGTH {
            return Err(Error::InvalidPath(format!(
                "path exceeds maximum length of {} bytes",
                MAX_PATH_LENGTH
            )));
        }
        if let EntrySource::Entry { archive, .. } = &source {
            if archive.0 >= self.attached.len() {
                return Err(Error::Unsupported {
                    operation: "content source handle from a different packer",
                });
            }
        }
        if !self.paths.insert(path.clone()) {
            return Err(Error::DuplicateEntry { path });
        }

        self.pending.push(PendingEntry {
            path,
            source,
            slot: 0,
            offset: 0,
            size: 0,
        });
        Ok(())
    }

    /// Adds an entry from an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_bytes(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Result<()> {
        self.add(path, EntrySource::Bytes(bytes.into()))
    }

    /// Adds an entry from UTF-8 text.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_str(&mut self, path: impl Into<String>, text: &str) -> Result<()> {
        self.add(path, EntrySource::Bytes(text.as_bytes().to_vec()))
    }

    /// Adds an entry from a caller-supplied reader.
    ///
    /// The reader is drained to end-of-stream during the content pass. Pass
    /// the reader by value to hand it over, or `&mut reader` to keep
    /// ownership and close it yourself afterwards.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_reader(&mut self, path: impl Into<String>, reader: impl Read + 'a) -> Result<()> {
        self.add(path, EntrySource::Reader(Box::new(reader)))
    }

    /// Adds an entry whose content is read from the file at `file_path`.
    ///
    /// The file is opened, copied, and closed during the content pass.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add); a missing file surfaces as an I/O error
    /// from `pack`, not from here.
    pub fn add_file(&mut self, path: impl Into<String>, file_path: impl Into<PathBuf>) -> Result<()> {
        self.add(path, EntrySource::File(file_path.into()))
    }

    /// Registers an open archive as a content source for
    /// [`add_entry`](Self::add_entry), taking ownership of its stream until
    /// packing completes.
    ///
    /// Clone the entries of interest before attaching:
    ///
    /// ```rust,ignore
    /// let source = Archive::open_path("old.pck")?;
    /// let entries: Vec<_> = source.entries().to_vec();
    /// let handle = packer.attach(source);
    /// for entry in &entries {
    ///     packer.add_entry(handle, entry)?;
    /// }
    /// ```
    ///
    /// Attaching an archive whose stream is also the packer's destination
    /// is unsupported: the content pass would read the region it is
    /// overwriting.
    pub fn attach<S: Read + Seek + 'a>(&mut self, source: Archive<S>) -> ArchiveHandle {
        self.attached.push(Box::new(source.into_inner()));
        ArchiveHandle(self.attached.len() - 1)
    }

    /// Adds a copy of `entry`'s content from an attached archive, stored
    /// under the entry's own path.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_entry(&mut self, archive: ArchiveHandle, entry: &Entry) -> Result<()> {
        self.add_entry_as(entry.path.clone(), archive, entry)
    }

    /// Adds a copy of `entry`'s content from an attached archive, stored
    /// under a new path.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_entry_as(
        &mut self,
        path: impl Into<String>,
        archive: ArchiveHandle,
        entry: &Entry,
    ) -> Result<()> {
        self.add(
            path,
            EntrySource::Entry {
                archive,
                offset: entry.offset,
                size: entry.size,
            },
        )
    }

    /// Consumes the packer and returns the destination stream.
    ///
    /// Use this when the stream must outlive the packer (for example to
    /// read back an in-memory pack); otherwise the stream is released when
    /// the packer is dropped.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn ensure_building(&self) -> Result<()> {
        if self.state != PackerState::Building {
            return Err(Error::Unsupported {
                operation: "add entries after pack",
            });
        }
        Ok(())
    }
}

impl<'a, W: Read + Write + Seek> Packer<'a, W> {
    /// Writes the container: header and placeholder table, content blocks,
    /// offset/size backpatch, and (when enabled in the options) a final
    /// MD5 checksum pass, then flushes the destination.
    ///
    /// Entries are processed in insertion order in every pass. Packing is
    /// all-or-nothing: if any pass fails partway, the destination is left
    /// truncated or inconsistent and no cleanup is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if the packer has already packed;
    /// I/O errors from any pass propagate unchanged. A failed pack still
    /// leaves the packer spent.
    pub fn pack(&mut self) -> Result<PackResult> {
        if self.state != PackerState::Building {
            return Err(Error::Unsupported {
                operation: "pack a second time",
            });
        }
        // Spent from here on, even if a pass below fails: the destination
        // would be inconsistent and a retry cannot repair it.
        self.state = PackerState::Packed;

        // The table stores the count as a signed 32-bit field.
        let entry_count = i32::try_from(self.pending.len()).map_err(|_| Error::Unsupported {
            operation: "more entries than the table's count field can hold",
        })? as u32;

        // Pass 1: header and placeholder table.
        let header = PckHeader {
            version: self.options.version,
            entry_count,
        };
        header.write(&mut self.sink)?;
        for entry in &mut self.pending {
            entry.slot = table::write_placeholder(&mut self.sink, &entry.path)?;
        }

        // Pass 2: content blocks, in insertion order. Sizes are measured
        // as position deltas; sources never declare a length.
        let mut content_size = 0u64;
        for entry in &mut self.pending {
            entry.offset = self.sink.stream_position()?;
            entry.source.pack_into(&mut self.sink, &mut self.attached)?;
            entry.size = self.sink.stream_position()? - entry.offset;
            content_size += entry.size;
        }

        // Pass 3: backpatch each entry's real offset and size.
        for entry in &self.pending {
            table::backpatch_extent(&mut self.sink, entry.slot, entry.offset, entry.size)?;
        }

        // Pass 4: optional checksum pass over the just-written content.
        if self.options.compute_checksum {
            for entry in &self.pending {
                let mut view = EntryStream::new(&mut self.sink, entry.offset, entry.size);
                let digest = checksum::md5_reader(&mut view)?;
                table::backpatch_checksum(&mut self.sink, entry.slot, &digest)?;
            }
        }

        self.sink.flush()?;

        log::debug!(
            "packed {} entries ({} content bytes)",
            self.pending.len(),
            content_size
        );

        Ok(PackResult {
            entries_written: self.pending.len(),
            content_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_packer_starts_building() {
        let packer = Packer::new(Cursor::new(Vec::<u8>::new()));
        assert_eq!(packer.state, PackerState::Building);
        assert!(packer.is_empty());
    }

    #[test]
    fn test_add_duplicate_path_fails_fast() {
        let mut packer = Packer::new(Cursor::new(Vec::<u8>::new()));
        packer.add_bytes("res://a.txt", b"one".to_vec()).unwrap();

        let err = packer.add_bytes("res://a.txt", b"two".to_vec()).unwrap_err();
        assert!(
            matches!(err, Error::DuplicateEntry { ref path } if path == "res://a.txt"),
            "got {:?}",
            err
        );
        assert_eq!(packer.len(), 1);
    }

    #[test]
    fn test_add_empty_path_rejected() {
        let mut packer = Packer::new(Cursor::new(Vec::<u8>::new()));
        let err = packer.add_bytes("", b"data".to_vec()).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)), "got {:?}", err);
    }

    #[test]
    fn test_pack_twice_is_unsupported() {
        let mut packer = Packer::new(Cursor::new(Vec::new()));
        packer.add_bytes("res://a.txt", b"hi".to_vec()).unwrap();
        packer.pack().unwrap();

        let err = packer.pack().unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }), "got {:?}", err);
    }

    #[test]
    fn test_add_after_pack_is_unsupported() {
        let mut packer = Packer::new(Cursor::new(Vec::new()));
        packer.pack().unwrap();

        let err = packer.add_bytes("res://late.txt", b"x".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }), "got {:?}", err);
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut packer = Packer::new(Cursor::new(Vec::<u8>::new()));
        let err = packer
            .add(
                "res://a.txt",
                EntrySource::Entry {
                    archive: ArchiveHandle(3),
                    offset: 0,
                    size: 0,
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }), "got {:?}", err);
    }

    #[test]
    fn test_pack_result_counts() {
        let mut packer = Packer::new(Cursor::new(Vec::new()));
        packer.add_bytes("res://a.txt", b"hi".to_vec()).unwrap();
        packer.add_bytes("res://b.bin", vec![0, 1, 2, 3]).unwrap();

        let result = packer.pack().unwrap();
        assert_eq!(result.entries_written, 2);
        assert_eq!(result.content_size, 6);
    }
}
