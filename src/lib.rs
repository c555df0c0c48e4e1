//! JT905 buffer writer
//!
//! Encodes JT905 telematics fields into a caller-owned buffer:
//! - `buffer` - write cursor with written/free regions
//! - `writer` - field encoders, patch writers, check codes, escaping
//! - `frame` - whole-frame helpers on top of the writer
//! - `config` / `logging` - ambient setup for the `jt905-frame` binary

pub mod buffer;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod logging;
pub mod writer;

pub use buffer::BufferWriter;
pub use error::{Jt905Error, Result};
pub use writer::checksum::xor;
pub use writer::{EscapeMode, Jt905Writer};
