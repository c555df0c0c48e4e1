//! Patch ("return") writers
//!
//! Overwrite bytes at an offset recorded earlier (from `skip`, `nil` or
//! `current_position`) without moving the write cursor. The whole target
//! range must already be written.

use super::text::pack_bcd;
use super::{gbk_bytes, Jt905Writer};
use crate::error::{Jt905Error, Result};

impl Jt905Writer<'_> {
    /// Written bytes `[offset, offset + width)`, or `OffsetOutOfRange`
    fn patch(&mut self, offset: usize, width: usize) -> Result<&mut [u8]> {
        let written = self.writer.written_count();
        match offset.checked_add(width) {
            Some(end) if end <= written => Ok(&mut self.writer.written_mut()[offset..end]),
            _ => Err(Jt905Error::OffsetOutOfRange {
                offset,
                width,
                written,
            }),
        }
    }

    pub fn write_u8_at(&mut self, position: usize, value: u8) -> Result<()> {
        self.patch(position, 1)?[0] = value;
        Ok(())
    }

    pub fn write_i16_at(&mut self, position: usize, value: i16) -> Result<()> {
        self.write_array_at(position, &value.to_be_bytes())
    }

    pub fn write_u16_at(&mut self, position: usize, value: u16) -> Result<()> {
        self.write_array_at(position, &value.to_be_bytes())
    }

    pub fn write_i32_at(&mut self, position: usize, value: i32) -> Result<()> {
        self.write_array_at(position, &value.to_be_bytes())
    }

    pub fn write_u32_at(&mut self, position: usize, value: u32) -> Result<()> {
        self.write_array_at(position, &value.to_be_bytes())
    }

    pub fn write_i64_at(&mut self, position: usize, value: i64) -> Result<()> {
        self.write_array_at(position, &value.to_be_bytes())
    }

    pub fn write_u64_at(&mut self, position: usize, value: u64) -> Result<()> {
        self.write_array_at(position, &value.to_be_bytes())
    }

    /// Overwrite with raw bytes
    pub fn write_array_at(&mut self, position: usize, src: &[u8]) -> Result<()> {
        self.patch(position, src.len())?.copy_from_slice(src);
        Ok(())
    }

    /// Overwrite with the GBK bytes of `value`
    pub fn write_string_at(&mut self, position: usize, value: &str) -> Result<()> {
        self.write_array_at(position, &gbk_bytes(value))
    }

    /// Overwrite `len / 2` bytes with `value` packed as BCD
    pub fn write_bcd_at(&mut self, position: usize, value: &str, len: usize) -> Result<()> {
        let dst = self.patch(position, len / 2)?;
        pack_bcd(dst, value, len)?;
        Ok(())
    }
}
