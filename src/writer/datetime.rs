//! Date and time packings
//!
//! Each calendar component is rendered as two decimal digits and then read
//! back under the caller's radix: `BCD_RADIX` (16) gives BCD ("25" -> 0x25),
//! `DECIMAL_RADIX` (10) gives the literal number (25 -> 0x19).
//!
//! | Writer            | Bytes | Layout                      |
//! |-------------------|-------|-----------------------------|
//! | `date_time6`      | 6     | `YY MM DD hh mm ss`         |
//! | `date_time5`      | 5     | `hh mm ss` + ms as `00 0f`  |
//! | `date_time4`      | 4     | `YY YY MM DD` (full year)   |
//! | `date_time3`      | 3     | `YY MM DD`                  |
//! | `utc_date_time`   | 8     | big-endian signed seconds   |
//!
//! The `_opt` variants zero-fill when no value is given.

use super::text::parse_pair;
use super::Jt905Writer;
use crate::constants::UTC_OFFSET_HOURS;
use crate::error::{Jt905Error, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};

/// One component below 100 as two decimal digits read under `radix`
fn two_digits(value: u32, radix: u32) -> Result<u8> {
    let hi = b'0' + (value / 10 % 10) as u8;
    let lo = b'0' + (value % 10) as u8;
    parse_pair(hi, lo, radix)
}

/// Calendar year, limited to the four digits the wire format can carry
fn year_of(value: &NaiveDateTime) -> Result<u32> {
    u32::try_from(value.year())
        .ok()
        .filter(|year| *year <= 9999)
        .ok_or_else(|| Jt905Error::malformed(value.year().to_string(), 10))
}

fn pack6(value: &NaiveDateTime, radix: u32) -> Result<[u8; 6]> {
    Ok([
        two_digits(year_of(value)? % 100, radix)?,
        two_digits(value.month(), radix)?,
        two_digits(value.day(), radix)?,
        two_digits(value.hour(), radix)?,
        two_digits(value.minute(), radix)?,
        two_digits(value.second(), radix)?,
    ])
}

fn pack5(value: &NaiveDateTime, radix: u32) -> Result<[u8; 5]> {
    // Leap seconds report up to 1999 ms, still four digits
    let millis = value.nanosecond() / 1_000_000;
    Ok([
        two_digits(value.hour(), radix)?,
        two_digits(value.minute(), radix)?,
        two_digits(value.second(), radix)?,
        two_digits(millis / 100, radix)?,
        two_digits(millis % 100, radix)?,
    ])
}

fn pack4(value: &NaiveDateTime, radix: u32) -> Result<[u8; 4]> {
    let year = year_of(value)?;
    Ok([
        two_digits(year / 100, radix)?,
        two_digits(year % 100, radix)?,
        two_digits(value.month(), radix)?,
        two_digits(value.day(), radix)?,
    ])
}

fn pack3(value: &NaiveDateTime, radix: u32) -> Result<[u8; 3]> {
    Ok([
        two_digits(year_of(value)? % 100, radix)?,
        two_digits(value.month(), radix)?,
        two_digits(value.day(), radix)?,
    ])
}

/// Signed seconds from 1970-01-01T00:00 to `value` shifted back to UTC
pub fn utc_seconds(value: &NaiveDateTime) -> i64 {
    value.and_utc().timestamp() - UTC_OFFSET_HOURS * 3600
}

impl Jt905Writer<'_> {
    /// `YYMMDDhhmmss`, 6 bytes
    pub fn write_date_time6(&mut self, value: &NaiveDateTime, radix: u32) -> Result<()> {
        self.write_array(&pack6(value, radix)?)
    }

    /// `YYMMDDhhmmss`, 6 bytes, zero-filled when absent
    pub fn write_date_time6_opt(
        &mut self,
        value: Option<&NaiveDateTime>,
        radix: u32,
    ) -> Result<()> {
        match value {
            Some(value) => self.write_date_time6(value, radix),
            None => self.write_array(&[0; 6]),
        }
    }

    /// `hhmmss` plus milliseconds as four digits, 5 bytes
    pub fn write_date_time5(&mut self, value: &NaiveDateTime, radix: u32) -> Result<()> {
        self.write_array(&pack5(value, radix)?)
    }

    /// `hhmmss` plus milliseconds, 5 bytes, zero-filled when absent
    pub fn write_date_time5_opt(
        &mut self,
        value: Option<&NaiveDateTime>,
        radix: u32,
    ) -> Result<()> {
        match value {
            Some(value) => self.write_date_time5(value, radix),
            None => self.write_array(&[0; 5]),
        }
    }

    /// `YYYYMMDD`, 4 bytes
    pub fn write_date_time4(&mut self, value: &NaiveDateTime, radix: u32) -> Result<()> {
        self.write_array(&pack4(value, radix)?)
    }

    /// `YYYYMMDD`, 4 bytes, zero-filled when absent
    pub fn write_date_time4_opt(
        &mut self,
        value: Option<&NaiveDateTime>,
        radix: u32,
    ) -> Result<()> {
        match value {
            Some(value) => self.write_date_time4(value, radix),
            None => self.write_array(&[0; 4]),
        }
    }

    /// `YYMMDD`, 3 bytes
    pub fn write_date_time3(&mut self, value: &NaiveDateTime, radix: u32) -> Result<()> {
        self.write_array(&pack3(value, radix)?)
    }

    /// `YYMMDD`, 3 bytes, zero-filled when absent
    pub fn write_date_time3_opt(
        &mut self,
        value: Option<&NaiveDateTime>,
        radix: u32,
    ) -> Result<()> {
        match value {
            Some(value) => self.write_date_time3(value, radix),
            None => self.write_array(&[0; 3]),
        }
    }

    /// Device wall-clock time as 8 big-endian bytes of UTC epoch seconds
    pub fn write_utc_date_time(&mut self, value: &NaiveDateTime) -> Result<()> {
        self.write_i64(utc_seconds(value))
    }
}
