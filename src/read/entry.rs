//! Archive entry records.

/// The conventional resource-root prefix carried by entry paths.
pub(crate) const RES_PREFIX: &str = "res://";

/// One named record in a PCK archive table.
///
/// Entries are created while the table is parsed and never mutated
/// afterwards. The record is plain data: to read the content it describes,
/// pass the entry's path to [`Archive::open_entry`] or
/// [`Archive::read_to_vec`].
///
/// [`Archive::open_entry`]: super::Archive::open_entry
/// [`Archive::read_to_vec`]: super::Archive::read_to_vec
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Entry {
    /// The resource path, conventionally starting with `res://`.
    ///
    /// The prefix is a storage convention and is not validated; the path is
    /// stored and matched verbatim.
    pub path: String,
    /// Byte offset of the content block within the container.
    pub offset: u64,
    /// Content length in bytes.
    pub size: u64,
    /// MD5 digest of the content block.
    ///
    /// All zero when the pack was written without checksums; use
    /// [`has_checksum`](Self::has_checksum) to distinguish.
    pub checksum: [u8; 16],
}

impl Entry {
    /// Returns true if a digest was stored for this entry.
    pub fn has_checksum(&self) -> bool {
        self.checksum != [0u8; 16]
    }

    /// Returns the stored digest as a lowercase hex string.
    pub fn checksum_hex(&self) -> String {
        hex::encode(self.checksum)
    }

    /// Returns the path with the leading `res://` prefix stripped.
    ///
    /// Paths without the prefix are returned unchanged. This is the
    /// filesystem-relative form used when extracting to a directory.
    pub fn relative_path(&self) -> &str {
        self.path.strip_prefix(RES_PREFIX).unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, checksum: [u8; 16]) -> Entry {
        Entry {
            path: path.to_string(),
            offset: 0,
            size: 0,
            checksum,
        }
    }

    #[test]
    fn test_has_checksum() {
        assert!(!entry("res://a", [0u8; 16]).has_checksum());
        let mut digest = [0u8; 16];
        digest[15] = 1;
        assert!(entry("res://a", digest).has_checksum());
    }

    #[test]
    fn test_checksum_hex() {
        let mut digest = [0u8; 16];
        digest[0] = 0xAB;
        assert_eq!(
            entry("res://a", digest).checksum_hex(),
            "ab000000000000000000000000000000"
        );
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(entry("res://dir/a.txt", [0u8; 16]).relative_path(), "dir/a.txt");
        assert_eq!(entry("plain.txt", [0u8; 16]).relative_path(), "plain.txt");
    }
}
