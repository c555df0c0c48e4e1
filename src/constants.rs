//! Protocol-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Framing
// =============================================================================

/// Frame start flag
pub const BEGIN_FLAG: u8 = 0x7e;

/// Frame end flag (same value as the start flag)
pub const END_FLAG: u8 = 0x7e;

/// Escape marker
pub const ESCAPE: u8 = 0x7d;

/// Second byte of the escape pair standing for `0x7e`
pub const ESCAPED_FLAG: u8 = 0x02;

/// Second byte of the escape pair standing for `0x7d`
pub const ESCAPED_ESCAPE: u8 = 0x01;

// =============================================================================
// Field encodings
// =============================================================================

/// Radix that turns two decimal digits into one BCD byte ("25" -> 0x25)
pub const BCD_RADIX: u32 = 16;

/// Radix that stores date components as literal numbers ("25" -> 25)
pub const DECIMAL_RADIX: u32 = 10;

/// Radixes accepted when parsing a two-digit group into a byte
pub const SUPPORTED_RADIXES: [u32; 4] = [2, 8, 10, 16];

/// Fixed offset between device wall-clock time and UTC (hours)
pub const UTC_OFFSET_HOURS: i64 = 8;

// =============================================================================
// Buffers
// =============================================================================

/// Default destination buffer size, room for a 2 KiB payload fully escaped
pub const DEFAULT_BUFFER_SIZE: usize = 4096;
