//! Content sources for pending pack entries.

use std::fs::File;
use std::io::{self, Read, Seek, Write};
use std::path::PathBuf;

use crate::Result;
use crate::read::EntryStream;

/// Object-safe combination of [`Read`] and [`Seek`], used to store attached
/// source archives of differing stream types side by side.
pub(crate) trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Identifier for an archive attached to a [`Packer`] as a content source.
///
/// Obtained from [`Packer::attach`] and only meaningful for the packer that
/// issued it.
///
/// [`Packer`]: super::Packer
/// [`Packer::attach`]: super::Packer::attach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHandle(pub(crate) usize);

/// Where a pending entry's bytes come from.
///
/// The closed set of content producers a packer can drive. Every variant
/// does one thing when the content pass reaches it: write its raw bytes
/// into the destination. No variant knows its length in advance; the packer
/// measures it as the destination's position delta. No per-entry framing is
/// written; framing lives entirely in the table.
pub enum EntrySource<'a> {
    /// A fixed in-memory buffer, written verbatim.
    Bytes(Vec<u8>),
    /// A caller-supplied reader, drained to end-of-stream at pack time.
    Reader(Box<dyn Read + 'a>),
    /// A file opened read-only at pack time, fully copied, then closed.
    File(PathBuf),
    /// The content region of an archive previously attached with
    /// [`Packer::attach`], copied through a bounded view at pack time.
    ///
    /// [`Packer::attach`]: super::Packer::attach
    Entry {
        /// Handle of the attached source archive.
        archive: ArchiveHandle,
        /// Byte offset of the region within the source archive.
        offset: u64,
        /// Length of the region in bytes.
        size: u64,
    },
}

impl std::fmt::Debug for EntrySource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Reader(_) => f.debug_tuple("Reader").finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Entry {
                archive,
                offset,
                size,
            } => f
                .debug_struct("Entry")
                .field("archive", archive)
                .field("offset", offset)
                .field("size", size)
                .finish(),
        }
    }
}

impl<'a> EntrySource<'a> {
    /// Writes this source's raw content into `dest`.
    ///
    /// `attached` is the packer's table of attached source archives,
    /// indexed by [`ArchiveHandle`].
    pub(crate) fn pack_into<W: Write>(
        &mut self,
        dest: &mut W,
        attached: &mut [Box<dyn ReadSeek + 'a>],
    ) -> Result<()> {
        match self {
            Self::Bytes(bytes) => dest.write_all(bytes)?,
            Self::Reader(reader) => {
                io::copy(reader, dest)?;
            }
            Self::File(path) => {
                let mut file = File::open(path.as_path())?;
                io::copy(&mut file, dest)?;
            }
            Self::Entry {
                archive,
                offset,
                size,
            } => {
                // The handle was validated when the entry was added.
                let reader = &mut attached[archive.0];
                let mut view = EntryStream::new(reader, *offset, *size);
                io::copy(&mut view, dest)?;
            }
        }
        Ok(())
    }
}
