//! Whole-entry reads, digest verification, and filesystem extraction.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek};
use std::path::Path;

use crate::checksum;
use crate::{Error, Result};

use super::entry_stream::EntryStream;
use super::Archive;

impl<R: Read + Seek> Archive<R> {
    /// Reads one entry's full content into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry has the given path;
    /// I/O errors propagate unchanged.
    pub fn read_to_vec(&mut self, path: &str) -> Result<Vec<u8>> {
        let (offset, size) = self.extent(path)?;
        let mut view = EntryStream::new(&mut self.reader, offset, size);
        let mut out = Vec::with_capacity(size as usize);
        view.read_to_end(&mut out)?;
        Ok(out)
    }

    /// Recomputes the MD5 digest over an entry's content region and
    /// compares it with the stored digest.
    ///
    /// Entries written without checksums (all-zero digest) verify
    /// trivially; use [`Entry::has_checksum`] to distinguish.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry has the given path;
    /// I/O errors propagate unchanged.
    ///
    /// [`Entry::has_checksum`]: super::Entry::has_checksum
    pub fn verify_entry(&mut self, path: &str) -> Result<bool> {
        let entry = self
            .get_entry(path)
            .cloned()
            .ok_or_else(|| Error::EntryNotFound {
                path: path.to_string(),
            })?;
        if !entry.has_checksum() {
            return Ok(true);
        }

        let mut view = EntryStream::new(&mut self.reader, entry.offset, entry.size);
        let digest = checksum::md5_reader(&mut view)?;
        Ok(digest == entry.checksum)
    }

    /// Extracts one entry's content to the file at `dest`.
    ///
    /// With `overwrite` set the destination is created or truncated;
    /// otherwise an existing file fails with the underlying
    /// `AlreadyExists` I/O error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry has the given path;
    /// I/O errors propagate unchanged.
    pub fn extract_entry_to_file(
        &mut self,
        path: &str,
        dest: impl AsRef<Path>,
        overwrite: bool,
    ) -> Result<()> {
        let (offset, size) = self.extent(path)?;
        let mut file = open_dest(dest.as_ref(), overwrite)?;
        let mut view = EntryStream::new(&mut self.reader, offset, size);
        io::copy(&mut view, &mut file)?;
        Ok(())
    }

    /// Extracts every entry into the directory at `dest`.
    ///
    /// Each entry's path has the literal `res://` prefix stripped to form
    /// its filesystem-relative path; parent directories are created as
    /// needed. Returns the number of entries extracted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if an entry's relative path is
    /// absolute or escapes `dest` via `..` components; I/O errors
    /// (including `AlreadyExists` when `overwrite` is unset) propagate
    /// unchanged. Extraction stops at the first failure.
    pub fn extract_to_dir(&mut self, dest: impl AsRef<Path>, overwrite: bool) -> Result<usize> {
        let dest = dest.as_ref();

        // Collect the plan first; the views below need the reader mutably.
        let plan: Vec<(String, u64, u64)> = self
            .entries()
            .iter()
            .map(|e| (e.relative_path().to_string(), e.offset, e.size))
            .collect();

        let mut extracted = 0usize;
        for (relative, offset, size) in plan {
            check_relative_path(&relative)?;

            let target = dest.join(&relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut file = open_dest(&target, overwrite)?;
            let mut view = EntryStream::new(&mut self.reader, offset, size);
            io::copy(&mut view, &mut file)?;
            extracted += 1;
        }

        log::debug!("extracted {} entries to {}", extracted, dest.display());
        Ok(extracted)
    }
}

fn open_dest(path: &Path, overwrite: bool) -> Result<File> {
    let file = if overwrite {
        File::create(path)?
    } else {
        OpenOptions::new().write(true).create_new(true).open(path)?
    };
    Ok(file)
}

/// Rejects relative paths that would land outside the destination
/// directory: absolute paths and any `..` component.
fn check_relative_path(relative: &str) -> Result<()> {
    if relative.is_empty() {
        return Err(Error::InvalidPath("empty entry path".into()));
    }
    if relative.starts_with('/') {
        return Err(Error::InvalidPath(format!(
            "absolute path not allowed: {}",
            relative
        )));
    }
    if relative.split('/').any(|segment| segment == "..") {
        return Err(Error::InvalidPath(format!(
            "'..' segment not allowed: {}",
            relative
        )));
    }
    Ok(())
}
