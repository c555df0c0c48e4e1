//! Fixed-capacity write cursor over a caller-owned buffer
//!
//! The buffer is split into two disjoint views:
//! - **written**: `[0, written_count)`, bytes already produced
//! - **free**: `[written_count, capacity)`, where the next field is encoded
//!
//! Every encoder reserves `n` bytes of the free region, fills them and then
//! calls `advance(n)`. Nothing here allocates.

use crate::error::{Jt905Error, Result};

/// Write cursor with a secondary "before escape" marker
pub struct BufferWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
    before_coding: Option<usize>,
}

impl<'a> BufferWriter<'a> {
    /// Create a cursor at offset 0 of `buf`
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            before_coding: None,
        }
    }

    /// Total size of the backing buffer
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes written so far
    #[inline]
    pub fn written_count(&self) -> usize {
        self.written
    }

    /// Bytes still available in the free region
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.written
    }

    /// Read-only view of `[0, written_count)`
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.written]
    }

    /// Mutable view of `[0, written_count)`, used by patch writers
    #[inline]
    pub fn written_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..self.written]
    }

    /// Mutable view of `[written_count, capacity)`
    #[inline]
    pub fn free(&mut self) -> &mut [u8] {
        &mut self.buf[self.written..]
    }

    /// Written and free regions at once, for transforms that read one and
    /// fill the other
    #[inline]
    pub fn split(&mut self) -> (&[u8], &mut [u8]) {
        let (written, free) = self.buf.split_at_mut(self.written);
        (&*written, free)
    }

    /// The first `n` bytes of the free region, or `CapacityExceeded`
    ///
    /// Does not move the cursor; call `advance(n)` once the bytes are filled.
    pub fn reserve(&mut self, n: usize) -> Result<&mut [u8]> {
        self.ensure(n)?;
        Ok(&mut self.buf[self.written..self.written + n])
    }

    /// Fail with `CapacityExceeded` unless `n` more bytes fit
    #[inline]
    pub fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Jt905Error::CapacityExceeded {
                requested: n,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Move the cursor forward by `n` bytes
    pub fn advance(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.written += n;
        Ok(())
    }

    /// Write position recorded by the last escape transform
    ///
    /// Equals `written_count` while no transform has run.
    #[inline]
    pub fn before_coding_position(&self) -> usize {
        self.before_coding.unwrap_or(self.written)
    }

    /// Whether an escape transform has recorded its boundary
    #[inline]
    pub fn is_coded(&self) -> bool {
        self.before_coding.is_some()
    }

    /// Record the write position before an escape transform
    pub fn set_before_coding_position(&mut self, position: usize) -> Result<()> {
        if position > self.written {
            return Err(Jt905Error::OffsetOutOfRange {
                offset: position,
                width: 0,
                written: self.written,
            });
        }
        self.before_coding = Some(position);
        Ok(())
    }

    /// Bytes produced before the escape transform (the whole written region
    /// when no transform has run)
    pub fn logical(&self) -> &[u8] {
        &self.buf[..self.before_coding_position()]
    }

    /// Bytes produced by the escape transform (the whole written region when
    /// no transform has run)
    pub fn encoded(&self) -> &[u8] {
        &self.buf[self.before_coding.unwrap_or(0)..self.written]
    }

    /// Consume the cursor, keeping the escaped bytes borrowed from the buffer
    pub fn into_encoded(self) -> &'a [u8] {
        let start = self.before_coding.unwrap_or(0);
        let buf: &'a [u8] = self.buf;
        &buf[start..self.written]
    }
}
