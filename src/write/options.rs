//! Pack options and result reporting.

use crate::format::PckVersion;

/// Options controlling how a pack is written.
///
/// # Example
///
/// ```rust
/// use pck::{PackOptions, PckVersion};
///
/// let options = PackOptions::new()
///     .version(PckVersion::new(4, 1, 0))
///     .compute_checksum(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Engine version triple written to the header.
    pub version: PckVersion,
    /// Whether an MD5 digest is computed and stored per entry.
    ///
    /// When unset (the default), each entry's digest field stays zero.
    pub compute_checksum: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            version: PckVersion::DEFAULT,
            compute_checksum: false,
        }
    }
}

impl PackOptions {
    /// Creates new pack options with defaults: version 3.2.4, checksums
    /// disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine version triple.
    pub fn version(mut self, version: PckVersion) -> Self {
        self.version = version;
        self
    }

    /// Enables or disables the per-entry MD5 checksum pass.
    pub fn compute_checksum(mut self, compute: bool) -> Self {
        self.compute_checksum = compute;
        self
    }
}

/// Statistics reported after a successful pack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackResult {
    /// Number of entries written.
    pub entries_written: usize,
    /// Total content bytes written, table excluded.
    pub content_size: u64,
}
