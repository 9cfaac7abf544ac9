//! # pck
//!
//! A pure-Rust library for reading and writing Godot PCK resource packs.
//!
//! A PCK container is a flat, uncompressed archive: a fixed header, a table
//! of named entries (path, offset, size, MD5), and the entries' raw content
//! blocks concatenated back to back. Entries are addressed by `res://`-style
//! resource paths and read back through bounded, seekable views without
//! loading the whole pack into memory.
//!
//! ## Quick Start
//!
//! ### Reading a Pack
//!
//! ```rust,no_run
//! use pck::{Archive, Result};
//!
//! fn main() -> Result<()> {
//!     let mut archive = Archive::open_path("game.pck")?;
//!
//!     for entry in archive.entries() {
//!         println!("{}: {} bytes", entry.path, entry.size);
//!     }
//!
//!     let icon = archive.read_to_vec("res://icon.png")?;
//!     println!("icon is {} bytes", icon.len());
//!     Ok(())
//! }
//! ```
//!
//! ### Writing a Pack
//!
//! ```rust,no_run
//! use pck::{PackOptions, Packer, Result};
//!
//! fn main() -> Result<()> {
//!     let mut packer =
//!         Packer::create_path("game.pck")?.options(PackOptions::new().compute_checksum(true));
//!
//!     packer.add_bytes("res://hello.txt", b"Hello, World!".to_vec())?;
//!     packer.add_file("res://icon.png", "assets/icon.png")?;
//!
//!     let result = packer.pack()?;
//!     println!("wrote {} entries", result.entries_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Lookup by path is not fallible in that
//! sense: [`Archive::get_entry`] returns `None` for a missing path rather
//! than an error.
//!
//! ## Concurrency
//!
//! The library is fully synchronous and performs blocking I/O on the streams
//! it is given. An [`EntryStream`] repositions the archive's shared cursor
//! as a side effect of reading, so views over the same archive must be used
//! sequentially: fully drain one before opening the next.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Default buffer size for read operations (8 KiB).
pub(crate) const READ_BUFFER_SIZE: usize = 8192;

pub mod checksum;
pub mod error;
pub mod format;
pub mod read;
pub mod write;

pub use error::{Error, Result};
pub use format::PckVersion;

// Re-export reading API at crate root for convenience
pub use read::{Archive, Entry, EntryStream};

// Re-export writing API at crate root for convenience
pub use write::{ArchiveHandle, EntrySource, PackOptions, PackResult, Packer};
