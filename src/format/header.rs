//! Fixed PCK header parsing and writing.

use std::io::{Read, Write};

use crate::{Error, Result};

use super::reader::read_i32_le;
use super::{FORMAT_VERSION, MAGIC, PckVersion, RESERVED_SIZE};

/// The fixed-size portion of a PCK header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PckHeader {
    /// Engine version triple recorded in the header.
    pub version: PckVersion,
    /// Number of records in the entry table.
    pub entry_count: u32,
}

impl PckHeader {
    /// Parses and validates the fixed header.
    ///
    /// The magic number and format version are checked before any later
    /// field is read, so a non-PCK input is rejected without interpreting
    /// its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the magic, format version, or
    /// entry count is invalid; I/O errors propagate unchanged.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        let magic = read_i32_le(r)?;
        if magic != MAGIC {
            return Err(Error::InvalidFormat(format!(
                "wrong pack magic: expected {:#010x}, got {:#010x}",
                MAGIC, magic
            )));
        }

        let format = read_i32_le(r)?;
        if format != FORMAT_VERSION {
            return Err(Error::InvalidFormat(format!(
                "unsupported pack format version: {}",
                format
            )));
        }

        let version = PckVersion::new(read_i32_le(r)?, read_i32_le(r)?, read_i32_le(r)?);

        let mut reserved = [0u8; RESERVED_SIZE];
        r.read_exact(&mut reserved)?; // ignored on read

        let entry_count = read_i32_le(r)?;
        if entry_count < 0 {
            return Err(Error::InvalidFormat(format!(
                "negative entry count: {}",
                entry_count
            )));
        }

        Ok(Self {
            version,
            entry_count: entry_count as u32,
        })
    }

    /// Writes the fixed header: magic, format version, engine version
    /// triple, 64 reserved zero bytes, entry count.
    ///
    /// # Errors
    ///
    /// I/O errors propagate unchanged.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&MAGIC.to_le_bytes())?;
        w.write_all(&FORMAT_VERSION.to_le_bytes())?;
        w.write_all(&self.version.major.to_le_bytes())?;
        w.write_all(&self.version.minor.to_le_bytes())?;
        w.write_all(&self.version.patch.to_le_bytes())?;
        w.write_all(&[0u8; RESERVED_SIZE])?;
        w.write_all(&(self.entry_count as i32).to_le_bytes())?;
        Ok(())
    }
}
