//! Error types for PCK archive operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when working with PCK containers, along with a convenient
//! [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`:
//!
//! ```rust,no_run
//! use pck::{Archive, Error};
//!
//! fn open_pack(path: &str) -> pck::Result<()> {
//!     match Archive::open_path(path) {
//!         Ok(archive) => {
//!             println!("opened pack with {} entries", archive.len());
//!             Ok(())
//!         }
//!         Err(Error::Io(e)) => {
//!             eprintln!("I/O error: {}", e);
//!             Err(Error::Io(e))
//!         }
//!         Err(Error::InvalidFormat(msg)) => {
//!             eprintln!("not a valid PCK file: {}", msg);
//!             Err(Error::InvalidFormat(msg))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! # fn main() {}
//! ```
//!
//! A missing entry during lookup is *not* an error: [`Archive::get_entry`]
//! returns `None`. Only the path-taking convenience operations (for example
//! [`Archive::read_to_vec`]) report absence as [`Error::EntryNotFound`].
//!
//! [`Archive::get_entry`]: crate::Archive::get_entry
//! [`Archive::read_to_vec`]: crate::Archive::read_to_vec

use std::io;

/// A specialized `Result` type for PCK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for PCK archive operations.
///
/// No error is ever retried or silently downgraded: every failure surfaces
/// immediately to the caller of the triggering operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred on the underlying stream.
    ///
    /// This wraps [`std::io::Error`] and is returned unchanged from any
    /// read, write, seek, or flush failure of the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The data is not a valid version-1 PCK container.
    ///
    /// This error occurs when:
    /// - The magic number is wrong (the file is not a PCK container)
    /// - The format version is not 1
    /// - The entry table is malformed or truncated
    ///
    /// The string describes what was expected vs. found.
    #[error("invalid PCK format: {0}")]
    InvalidFormat(String),

    /// Two entries share the same path.
    ///
    /// Raised fail-fast by [`Packer::add`] for pending entries, and during
    /// parsing when an existing container carries a duplicated path.
    ///
    /// [`Packer::add`]: crate::Packer::add
    #[error("duplicate entry path: {path}")]
    DuplicateEntry {
        /// The path that was registered twice.
        path: String,
    },

    /// A path-taking convenience operation was given a path with no entry.
    ///
    /// Plain lookup ([`Archive::get_entry`]) never produces this; it returns
    /// `None` instead.
    ///
    /// [`Archive::get_entry`]: crate::Archive::get_entry
    #[error("entry not found: {path}")]
    EntryNotFound {
        /// The path that matched no entry.
        path: String,
    },

    /// An entry path was rejected before being written.
    ///
    /// Paths must be non-empty, fit in the table's length field, and (for
    /// extraction) must not escape the destination directory.
    #[error("invalid entry path: {0}")]
    InvalidPath(String),

    /// The operation is not supported in the packer's current state.
    ///
    /// Raised when entries are added after [`Packer::pack`] has run, or when
    /// `pack` is invoked a second time.
    ///
    /// [`Packer::pack`]: crate::Packer::pack
    #[error("unsupported operation: {operation}")]
    Unsupported {
        /// A description of the rejected operation.
        operation: &'static str,
    },
}

impl Error {
    /// Returns true if this error indicates the input is not a valid pack.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidFormat(_) | Self::DuplicateEntry { .. })
    }
}
