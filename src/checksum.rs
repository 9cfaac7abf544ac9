//! Content digest computation.
//!
//! PCK containers store an optional MD5 digest per entry in the table. The
//! digest covers the entry's raw content block; an all-zero field means no
//! digest was computed when the pack was written.

use std::io::{self, Read};

use md5::Context;

use crate::READ_BUFFER_SIZE;

/// Computes the MD5 digest of everything remaining in `reader`.
///
/// Data is consumed in fixed-size chunks so arbitrarily large entries can be
/// digested without buffering them in memory.
///
/// # Errors
///
/// Propagates any I/O error from the reader.
pub fn md5_reader<R: Read>(reader: &mut R) -> io::Result<[u8; 16]> {
    let mut context = Context::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        context.consume(&buffer[..n]);
    }
    let digest = context.finalize();
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest[..]);
    Ok(out)
}
