//! Centralized error types for the writer
//!
//! All writer errors are represented by the `Jt905Error` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, Jt905Error>`.

use std::fmt;
use std::path::PathBuf;

/// All writer errors
#[derive(Debug)]
pub enum Jt905Error {
    // === Encoding ===
    /// Append would run past the end of the destination buffer
    CapacityExceeded { requested: usize, available: usize },
    /// Patch targets bytes that have not been written yet
    OffsetOutOfRange {
        offset: usize,
        width: usize,
        written: usize,
    },
    /// Checksum or transform range has start past end
    RangeInvalid { start: usize, end: usize },
    /// Text cannot be parsed under the requested radix
    MalformedInput { text: String, radix: u32 },

    // === Config ===
    /// Config file could not be read
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for `Config`
    ConfigParse { path: PathBuf, reason: String },
}

impl Jt905Error {
    pub(crate) fn malformed(text: impl Into<String>, radix: u32) -> Self {
        Self::MalformedInput {
            text: text.into(),
            radix,
        }
    }
}

impl std::error::Error for Jt905Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for Jt905Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                available,
            } => write!(
                f,
                "Buffer capacity exceeded: {} bytes requested, {} available",
                requested, available
            ),
            Self::OffsetOutOfRange {
                offset,
                width,
                written,
            } => write!(
                f,
                "Patch offset out of range: {}..{} (written {})",
                offset,
                offset.saturating_add(*width),
                written
            ),
            Self::RangeInvalid { start, end } => {
                write!(f, "Invalid range: start {} > end {}", start, end)
            }
            Self::MalformedInput { text, radix } => {
                write!(f, "Cannot parse {:?} in base {}", text, radix)
            }
            Self::ConfigRead { path, .. } => write!(f, "Cannot read config: {}", path.display()),
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
        }
    }
}

/// Alias for Result with Jt905Error
pub type Result<T> = std::result::Result<T, Jt905Error>;
