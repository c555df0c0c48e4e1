//! JT905 message writer
//!
//! Field encoders layered on [`BufferWriter`]:
//! - **Forward writers** (this module): integers, text, raw arrays, flags
//! - **Patch writers** (`patch`): overwrite a recorded offset in place
//! - **Dates** (`datetime`): BCD date/time packings and UTC seconds
//! - **Numeric text** (`text`): BCD, Hex and big-endian number packing
//! - **Checksums** (`checksum`): XOR check codes over written ranges
//! - **Escaping** (`escape`): `0x7e`/`0x7d` byte stuffing
//!
//! # Example
//!
//! ```
//! use jt905_writer::Jt905Writer;
//!
//! let mut buf = [0u8; 64];
//! let mut writer = Jt905Writer::new(&mut buf);
//!
//! writer.write_start().unwrap();
//! let len_pos = writer.skip(2, 0x00).unwrap();
//! writer.write_array(&[0x01, 0x7e]).unwrap();
//! writer.write_u16_at(len_pos, 2).unwrap();
//! writer.write_xor().unwrap();
//! writer.write_end().unwrap();
//! writer.write_encode().unwrap();
//!
//! assert_eq!(
//!     writer.encoded(),
//!     &[0x7e, 0x00, 0x02, 0x01, 0x7d, 0x02, 0x7d, 0x01, 0x7e]
//! );
//! ```

pub mod checksum;
pub mod datetime;
pub mod escape;
mod patch;
pub mod text;

pub use escape::EscapeMode;

use crate::buffer::BufferWriter;
use crate::constants::{BEGIN_FLAG, END_FLAG};
use crate::error::Result;
use bytes::Bytes;
use encoding_rs::GBK;
use std::borrow::Cow;
use tracing::trace;

/// GBK bytes of `value`
///
/// Characters GBK cannot represent come out as `&#NNNN;` references.
pub(crate) fn gbk_bytes(value: &str) -> Cow<'_, [u8]> {
    let (bytes, _, unmappable) = GBK.encode(value);
    if unmappable {
        trace!("GBK cannot represent all of {:?}", value);
    }
    bytes
}

/// Sequential encoder for one outbound JT905 message
pub struct Jt905Writer<'a> {
    writer: BufferWriter<'a>,
}

impl<'a> Jt905Writer<'a> {
    /// Create a writer over a caller-owned destination buffer
    ///
    /// Size the buffer for the escaped output: the escape transform writes
    /// behind the original bytes and may double them.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            writer: BufferWriter::new(buffer),
        }
    }

    /// Underlying cursor
    #[inline]
    pub fn buffer(&self) -> &BufferWriter<'a> {
        &self.writer
    }

    /// Current write position, to record an offset for a later patch
    #[inline]
    pub fn current_position(&self) -> usize {
        self.writer.written_count()
    }

    // =========================================================================
    // Retrieval
    // =========================================================================

    /// Wire-ready bytes produced by the escape transform
    ///
    /// Before any transform this is the whole written region.
    pub fn encoded(&self) -> &[u8] {
        self.writer.encoded()
    }

    /// Owned copy of [`encoded`](Self::encoded)
    pub fn encoded_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.writer.encoded())
    }

    /// Bytes written before the escape transform
    pub fn logical(&self) -> &[u8] {
        self.writer.logical()
    }

    /// Everything resident in the buffer: unescaped bytes followed by the
    /// escaped copy
    pub fn physical(&self) -> &[u8] {
        self.writer.written()
    }

    /// Consume the writer, keeping the wire-ready bytes
    pub fn into_encoded(self) -> &'a [u8] {
        self.writer.into_encoded()
    }

    // =========================================================================
    // Flags and placeholders
    // =========================================================================

    /// Append the frame start flag
    pub fn write_start(&mut self) -> Result<()> {
        self.write_u8(BEGIN_FLAG)
    }

    /// Append the frame end flag
    pub fn write_end(&mut self) -> Result<()> {
        self.write_u8(END_FLAG)
    }

    /// Append a single `0x00`, returning its offset
    pub fn nil(&mut self) -> Result<usize> {
        self.skip(1, 0x00)
    }

    /// Append `count` copies of `fill`, returning the offset they start at
    pub fn skip(&mut self, count: usize, fill: u8) -> Result<usize> {
        let position = self.writer.written_count();
        self.writer.reserve(count)?.fill(fill);
        self.writer.advance(count)?;
        Ok(position)
    }

    // =========================================================================
    // Integers (big-endian)
    // =========================================================================

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put(&[value])
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    // =========================================================================
    // Text and raw bytes
    // =========================================================================

    /// Append one character as a single byte; characters outside Latin-1
    /// become `?`
    pub fn write_char(&mut self, value: char) -> Result<()> {
        self.write_u8(u8::try_from(value).unwrap_or(b'?'))
    }

    /// Append `value` encoded as GBK, the protocol's text encoding
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.put(&gbk_bytes(value))
    }

    /// Append `value` as GBK followed by a `0x00` terminator
    pub fn write_string_nul(&mut self, value: &str) -> Result<()> {
        let bytes = gbk_bytes(value);
        self.writer.ensure(bytes.len().saturating_add(1))?;
        self.put(&bytes)?;
        self.write_u8(0x00)
    }

    /// Append one byte per character; non-ASCII characters become `?`
    pub fn write_ascii(&mut self, value: &str) -> Result<()> {
        let count = value.chars().count();
        let dst = self.writer.reserve(count)?;
        for (slot, ch) in dst.iter_mut().zip(value.chars()) {
            *slot = if ch.is_ascii() { ch as u8 } else { b'?' };
        }
        self.writer.advance(count)
    }

    /// Append raw bytes
    pub fn write_array(&mut self, src: &[u8]) -> Result<()> {
        self.put(src)
    }

    fn put(&mut self, src: &[u8]) -> Result<()> {
        self.writer.reserve(src.len())?.copy_from_slice(src);
        self.writer.advance(src.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Jt905Error;

    #[test]
    fn test_integers_are_big_endian() {
        let mut buf = [0u8; 32];
        let mut writer = Jt905Writer::new(&mut buf);

        writer.write_u8(0xAB).unwrap();
        writer.write_i8(-128).unwrap();
        writer.write_u16(0x1234).unwrap();
        writer.write_i16(-2).unwrap();
        writer.write_u32(0xDEADBEEF).unwrap();
        writer.write_i32(-1).unwrap();

        assert_eq!(
            writer.physical(),
            &[
                0xAB, 0x80, 0x12, 0x34, 0xFF, 0xFE, 0xDE, 0xAD, 0xBE, 0xEF, 0xFF, 0xFF, 0xFF,
                0xFF
            ]
        );
    }

    #[test]
    fn test_integer_boundaries() {
        let signed16 = [0, 1, -1, i16::MIN, i16::MAX];
        let signed32 = [0, 1, -1, i32::MIN, i32::MAX];
        let signed64 = [0, 1, -1, i64::MIN, i64::MAX];
        let unsigned16 = [0, 1, u16::MAX];
        let unsigned32 = [0, 1, u32::MAX];
        let unsigned64 = [0, 1, u64::MAX];

        let mut buf = [0u8; 256];
        let mut writer = Jt905Writer::new(&mut buf);
        for v in signed16 {
            writer.write_i16(v).unwrap();
        }
        for v in signed32 {
            writer.write_i32(v).unwrap();
        }
        for v in signed64 {
            writer.write_i64(v).unwrap();
        }
        for v in unsigned16 {
            writer.write_u16(v).unwrap();
        }
        for v in unsigned32 {
            writer.write_u32(v).unwrap();
        }
        for v in unsigned64 {
            writer.write_u64(v).unwrap();
        }

        let mut expected = Vec::new();
        signed16.iter().for_each(|v| expected.extend(v.to_be_bytes()));
        signed32.iter().for_each(|v| expected.extend(v.to_be_bytes()));
        signed64.iter().for_each(|v| expected.extend(v.to_be_bytes()));
        unsigned16.iter().for_each(|v| expected.extend(v.to_be_bytes()));
        unsigned32.iter().for_each(|v| expected.extend(v.to_be_bytes()));
        unsigned64.iter().for_each(|v| expected.extend(v.to_be_bytes()));

        assert_eq!(writer.physical(), expected.as_slice());
        assert_eq!(&writer.physical()[..4], &[0x00, 0x00, 0x00, 0x01]);
        assert_eq!(&writer.physical()[4..8], &[0xFF, 0xFF, 0x80, 0x00]);
    }

    #[test]
    fn test_skip_returns_start_offset() {
        let mut buf = [0u8; 16];
        let mut writer = Jt905Writer::new(&mut buf);

        writer.write_start().unwrap();
        let pos = writer.skip(3, 0xFF).unwrap();
        let nil = writer.nil().unwrap();

        assert_eq!(pos, 1);
        assert_eq!(nil, 4);
        assert_eq!(writer.physical(), &[0x7e, 0xFF, 0xFF, 0xFF, 0x00]);
        assert_eq!(writer.current_position(), 5);
    }

    #[test]
    fn test_write_strings() {
        let mut buf = [0u8; 32];
        let mut writer = Jt905Writer::new(&mut buf);

        writer.write_string("AB").unwrap();
        writer.write_string_nul("C").unwrap();
        writer.write_char('D').unwrap();
        writer.write_ascii("é1").unwrap();

        assert_eq!(writer.physical(), b"ABC\0D?1");
    }

    #[test]
    fn test_write_string_is_gbk() {
        let mut buf = [0u8; 16];
        let mut writer = Jt905Writer::new(&mut buf);

        writer.write_string("中文").unwrap();
        writer.write_string_nul("A1").unwrap();

        assert_eq!(
            writer.physical(),
            &[0xD6, 0xD0, 0xCE, 0xC4, b'A', b'1', 0x00]
        );
    }

    #[test]
    fn test_string_nul_counts_encoded_bytes() {
        let mut buf = [0u8; 4];
        let mut writer = Jt905Writer::new(&mut buf);

        // Two characters, four GBK bytes, plus the terminator
        let err = writer.write_string_nul("中文").unwrap_err();
        assert!(matches!(
            err,
            Jt905Error::CapacityExceeded {
                requested: 5,
                available: 4
            }
        ));
        assert_eq!(writer.current_position(), 0);
    }

    #[test]
    fn test_write_char_outside_latin1() {
        let mut buf = [0u8; 4];
        let mut writer = Jt905Writer::new(&mut buf);

        writer.write_char('中').unwrap();
        writer.write_char('\u{e9}').unwrap();
        assert_eq!(writer.physical(), &[b'?', 0xE9]);
    }

    #[test]
    fn test_string_nul_checks_room_first() {
        let mut buf = [0u8; 3];
        let mut writer = Jt905Writer::new(&mut buf);

        assert!(writer.write_string_nul("abc").is_err());
        assert_eq!(writer.current_position(), 0);
    }

    #[test]
    fn test_write_past_capacity_fails() {
        let mut buf = [0u8; 3];
        let mut writer = Jt905Writer::new(&mut buf);

        writer.write_u16(1).unwrap();
        let err = writer.write_u16(2).unwrap_err();

        assert!(matches!(err, Jt905Error::CapacityExceeded { .. }));
        assert_eq!(writer.current_position(), 2);
    }

    #[test]
    fn test_retrieval_without_transform() {
        let mut buf = [0u8; 8];
        let mut writer = Jt905Writer::new(&mut buf);
        writer.write_array(&[1, 2, 3]).unwrap();

        assert_eq!(writer.encoded(), &[1, 2, 3]);
        assert_eq!(writer.logical(), &[1, 2, 3]);
        assert_eq!(writer.encoded_bytes().as_ref(), &[1, 2, 3]);
    }
}
