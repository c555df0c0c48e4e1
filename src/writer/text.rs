//! Numeric-text packing
//!
//! Turns digit strings into packed bytes, two digits per byte:
//! - **BCD**: decimal digits, left-padded with `'0'` to the requested digit count
//! - **Hex**: hex digits, optional `0x` prefix, spaces ignored
//! - **Big number**: the text's integer value as big-endian bytes

use super::Jt905Writer;
use crate::constants::{BCD_RADIX, SUPPORTED_RADIXES};
use crate::error::{Jt905Error, Result};
use std::iter;

/// Parse one two-digit group under `radix` into a byte
///
/// Fails with `MalformedInput` when either digit is invalid for `radix`, the
/// group value does not fit a byte, or `radix` is not one of 2, 8, 10, 16.
pub fn parse_pair(hi: u8, lo: u8, radix: u32) -> Result<u8> {
    let malformed = || Jt905Error::malformed(String::from_utf8_lossy(&[hi, lo]), radix);
    if !SUPPORTED_RADIXES.contains(&radix) {
        return Err(malformed());
    }
    let digit = |b: u8| char::from(b).to_digit(radix);
    match (digit(hi), digit(lo)) {
        (Some(h), Some(l)) => u8::try_from(h * radix + l).map_err(|_| malformed()),
        _ => Err(malformed()),
    }
}

/// Pack `pad` zero digits followed by `digits` into `dst`, one group per byte
///
/// Returns the number of bytes produced, which is less than `dst.len()` only
/// when the digits run out.
fn pack_digits<I>(dst: &mut [u8], pad: usize, digits: I, radix: u32) -> Result<usize>
where
    I: Iterator<Item = u8>,
{
    let mut padded = iter::repeat(b'0').take(pad).chain(digits);
    let mut produced = 0;
    for slot in dst.iter_mut() {
        match (padded.next(), padded.next()) {
            (Some(hi), Some(lo)) => *slot = parse_pair(hi, lo, radix)?,
            _ => break,
        }
        produced += 1;
    }
    Ok(produced)
}

/// BCD-pack `value` padded to `len` digits into `dst` (`len / 2` bytes)
pub(super) fn pack_bcd(dst: &mut [u8], value: &str, len: usize) -> Result<usize> {
    let pad = len.saturating_sub(value.len());
    pack_digits(dst, pad, value.bytes(), BCD_RADIX)
}

/// Hex digits of `value` with spaces and a leading `0x`/`0X` removed
fn hex_digits(value: &str) -> impl Iterator<Item = u8> + Clone + '_ {
    let cleaned = value.bytes().filter(|b| *b != b' ');
    let mut head = cleaned.clone();
    let prefixed = matches!((head.next(), head.next()), (Some(b'0'), Some(b'x' | b'X')));
    cleaned.skip(if prefixed { 2 } else { 0 })
}

/// Integer value of `value`; empty text is zero, fractions are truncated
fn parse_number(value: &str) -> Result<u64> {
    let text = value.trim();
    if text.is_empty() {
        return Ok(0);
    }
    if let Ok(number) = text.parse::<u64>() {
        return Ok(number);
    }
    match text.parse::<f64>() {
        // `as` saturates: negatives clamp to zero
        Ok(number) if number.is_finite() => Ok(number as u64),
        _ => Err(Jt905Error::malformed(text, 10)),
    }
}

impl Jt905Writer<'_> {
    /// Append `value` as BCD, left-padded with zeros to `len` digits
    ///
    /// Writes `len / 2` bytes. Text longer than `len` keeps its leading digits.
    pub fn write_bcd(&mut self, value: &str, len: usize) -> Result<()> {
        let dst = self.writer.reserve(len / 2)?;
        let produced = pack_bcd(dst, value, len)?;
        self.writer.advance(produced)
    }

    /// Append hex text as raw bytes
    ///
    /// `len` is the byte count; `None` takes half the digit count of `value`.
    /// Short input is left-padded with zeros.
    pub fn write_hex(&mut self, value: &str, len: Option<usize>) -> Result<()> {
        let digits = hex_digits(value);
        let available = digits.clone().count();
        let length = len.unwrap_or(available / 2);
        let dst = self.writer.reserve(length)?;
        let pad = (length * 2).saturating_sub(available);

        let produced = pack_digits(dst, pad, digits, 16)?;
        self.writer.advance(produced)
    }

    /// Append the integer in `value` as `len` big-endian bytes
    ///
    /// High bytes are dropped when `len < 8` and zero-filled when `len > 8`.
    pub fn write_big_number(&mut self, value: &str, len: usize) -> Result<()> {
        let mut number = parse_number(value)?;
        let dst = self.writer.reserve(len)?;
        for slot in dst.iter_mut().rev() {
            *slot = (number & 0xFF) as u8;
            number >>= 8;
        }
        self.writer.advance(len)
    }
}
