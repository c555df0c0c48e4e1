//! XOR check codes
//!
//! The JT905 check code is the XOR-fold of a byte range, seeded with the
//! first byte of the range, appended as one byte. The forms without an end
//! run to the current write position; `write_xor` starts at offset 1 so the
//! leading frame flag is left out.

use super::Jt905Writer;
use crate::error::{Jt905Error, Result};
use tracing::trace;

/// XOR-fold of `bytes` starting from the first byte; `0x00` when empty
pub fn xor(bytes: &[u8]) -> u8 {
    match bytes.split_first() {
        Some((first, rest)) => rest.iter().fold(*first, |acc, b| acc ^ b),
        None => 0x00,
    }
}

impl Jt905Writer<'_> {
    /// Append the XOR of written bytes `[start, end)`
    pub fn write_xor_range(&mut self, start: usize, end: usize) -> Result<()> {
        if start > end {
            return Err(Jt905Error::RangeInvalid { start, end });
        }
        let written = self.writer.written_count();
        if end > written {
            return Err(Jt905Error::OffsetOutOfRange {
                offset: start,
                width: end - start,
                written,
            });
        }
        let code = xor(&self.writer.written()[start..end]);
        trace!(start, end, code, "xor check code");
        self.write_u8(code)
    }

    /// Append the XOR of written bytes `[start, written_count)`
    pub fn write_xor_from(&mut self, start: usize) -> Result<()> {
        self.write_xor_range(start, self.writer.written_count())
    }

    /// Append the XOR of everything after the frame start flag
    pub fn write_xor(&mut self) -> Result<()> {
        self.write_xor_from(1)
    }

    /// Append the JT/T 19056 recorder check code of `[start, written_count)`
    ///
    /// Zero-seeded fold over the range, used for data blocks tunnelled
    /// through a JT905 body.
    pub fn write_check_code(&mut self, start: usize) -> Result<()> {
        let end = self.writer.written_count();
        if start > end {
            return Err(Jt905Error::RangeInvalid { start, end });
        }
        let code = self.writer.written()[start..end]
            .iter()
            .fold(0u8, |acc, b| acc ^ b);
        self.write_u8(code)
    }
}
