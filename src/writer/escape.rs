//! JT905 byte stuffing
//!
//! Inside a frame, `0x7e` becomes `0x7d 0x02` and `0x7d` becomes `0x7d 0x01`.
//! The transform reads the written region and appends the escaped copy to
//! the free region, so offsets recorded before it stay valid. Afterwards the
//! cursor's before-coding marker separates the two copies.

use super::Jt905Writer;
use crate::constants::{BEGIN_FLAG, ESCAPE, ESCAPED_ESCAPE, ESCAPED_FLAG};
use crate::error::{Jt905Error, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which part of the written region gets escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Everything but the first and last byte (frame flags already written)
    #[default]
    Body,
    /// The whole written region (frame flags added afterwards)
    Full,
}

impl EscapeMode {
    /// Leading and trailing bytes copied through unescaped
    fn kept(self) -> (usize, usize) {
        match self {
            Self::Body => (1, 1),
            Self::Full => (0, 0),
        }
    }
}

/// Length of `bytes` once escaped
pub fn escaped_len(bytes: &[u8]) -> usize {
    bytes.len()
        + bytes
            .iter()
            .filter(|b| matches!(**b, BEGIN_FLAG | ESCAPE))
            .count()
}

/// Escape `src` into the front of `dst`, returning the bytes written
///
/// `dst` must hold at least `escaped_len(src)` bytes.
fn escape_into(src: &[u8], dst: &mut [u8]) -> usize {
    let mut n = 0;
    for &byte in src {
        match byte {
            BEGIN_FLAG => {
                dst[n] = ESCAPE;
                dst[n + 1] = ESCAPED_FLAG;
                n += 2;
            }
            ESCAPE => {
                dst[n] = ESCAPE;
                dst[n + 1] = ESCAPED_ESCAPE;
                n += 2;
            }
            _ => {
                dst[n] = byte;
                n += 1;
            }
        }
    }
    n
}

impl Jt905Writer<'_> {
    /// Escape the whole written region
    pub fn write_full_encode(&mut self) -> Result<()> {
        self.write_escaped(EscapeMode::Full)
    }

    /// Escape between the start and end flags, keeping both flags as-is
    pub fn write_encode(&mut self) -> Result<()> {
        self.write_escaped(EscapeMode::Body)
    }

    /// Append the escaped copy of the written region
    ///
    /// Records the pre-transform write position as the before-coding marker
    /// and advances past the escaped bytes. Nothing is written when the free
    /// region cannot hold the result.
    pub fn write_escaped(&mut self, mode: EscapeMode) -> Result<()> {
        let (head, tail) = mode.kept();
        let start = self.writer.written_count();
        if head + tail > start {
            return Err(Jt905Error::RangeInvalid {
                start: head,
                end: start.saturating_sub(tail),
            });
        }
        let body_end = start - tail;

        let (src, dst) = self.writer.split();
        let needed = head + escaped_len(&src[head..body_end]) + tail;
        if needed > dst.len() {
            return Err(Jt905Error::CapacityExceeded {
                requested: needed,
                available: dst.len(),
            });
        }

        dst[..head].copy_from_slice(&src[..head]);
        let mut n = head;
        n += escape_into(&src[head..body_end], &mut dst[n..]);
        dst[n..n + tail].copy_from_slice(&src[body_end..]);
        n += tail;

        trace!(?mode, before = start, escaped = n, "escape transform");
        self.writer.set_before_coding_position(start)?;
        self.writer.advance(n)
    }
}
