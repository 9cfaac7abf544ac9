//! Bounded read-only view over one entry's content region.

use std::io::{self, Read, Seek, SeekFrom};

/// A read-only, seekable window over `[start, start + size)` of an
/// archive's underlying stream.
///
/// The view does not assume exclusive control of the shared cursor: before
/// every read it repositions the underlying stream if something else moved
/// it. Seeking is relative to the view's own range and saturates at both
/// bounds instead of erroring; reading at the end of the range returns
/// `Ok(0)`.
///
/// There is no way to write through a view: the type implements [`Read`]
/// and [`Seek`] only.
///
/// # Shared-Cursor Constraint
///
/// Two views over the same underlying stream must not be interleaved: each
/// repositions the shared cursor as a side effect of reading, so alternating
/// reads corrupt both views' apparent positions. Sequential use (fully drain
/// one view before opening the next) is safe.
#[derive(Debug)]
pub struct EntryStream<'a, R: ?Sized> {
    inner: &'a mut R,
    start: u64,
    size: u64,
    /// Logical position as an absolute offset in the underlying stream,
    /// always within `[start, start + size]`.
    pos: u64,
}

impl<'a, R: Read + Seek + ?Sized> EntryStream<'a, R> {
    pub(crate) fn new(inner: &'a mut R, start: u64, size: u64) -> Self {
        Self {
            inner,
            start,
            size,
            pos: start,
        }
    }

    /// Content length of this view in bytes.
    pub fn len(&self) -> u64 {
        self.size
    }

    /// Returns true if the view covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current position relative to the start of the view.
    pub fn position(&self) -> u64 {
        self.pos - self.start
    }
}

impl<R: Read + Seek + ?Sized> Read for EntryStream<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let end = self.start + self.size;
        if self.pos >= end || buf.is_empty() {
            return Ok(0);
        }

        // Another view (or the archive itself) may have moved the shared
        // cursor since the last call.
        if self.inner.stream_position()? != self.pos {
            self.inner.seek(SeekFrom::Start(self.pos))?;
        }

        let want = (buf.len() as u64).min(end - self.pos) as usize;
        let n = self.inner.read(&mut buf[..want])?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Read + Seek + ?Sized> Seek for EntryStream<'_, R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let end = self.start + self.size;
        let target = match pos {
            SeekFrom::Start(n) => self.start.saturating_add(n),
            SeekFrom::Current(d) => offset_by(self.pos, d),
            SeekFrom::End(d) => offset_by(end, d),
        };
        self.pos = target.clamp(self.start, end);
        Ok(self.pos - self.start)
    }
}

/// Applies a signed delta to a position, saturating at the u64 bounds.
/// The result is clamped into the view's range by the caller.
fn offset_by(base: u64, delta: i64) -> u64 {
    if delta >= 0 {
        base.saturating_add(delta as u64)
    } else {
        base.saturating_sub(delta.unsigned_abs())
    }
}
