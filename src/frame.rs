//! Whole-frame helpers used by the `jt905-frame` binary
//!
//! Frame layout: `7e | body | check code | 7e`, with the check code being the
//! XOR of the body and everything between the flags escaped.

use crate::constants::{BEGIN_FLAG, END_FLAG};
use crate::error::Result;
use crate::writer::{EscapeMode, Jt905Writer};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

/// A built frame
#[derive(Debug, Clone)]
pub struct BuiltFrame {
    /// Wire-ready bytes
    pub encoded: Bytes,
    /// Everything the writer left in its buffer
    pub physical: Bytes,
}

/// Bytes of a hex string (spaces and `0x` prefix allowed)
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; text.len() / 2];
    let mut writer = Jt905Writer::new(&mut buf);
    writer.write_hex(text, None)?;
    Ok(writer.physical().to_vec())
}

/// Upper-case hex, one space between bytes
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Frame `body` into a buffer of `buffer_size` bytes
///
/// `EscapeMode::Body` writes both flags first and escapes between them.
/// `EscapeMode::Full` escapes body and check code, then wraps the result in
/// flags outside the writer.
pub fn build_frame(body: &[u8], mode: EscapeMode, buffer_size: usize) -> Result<BuiltFrame> {
    let mut buf = vec![0u8; buffer_size];
    let mut writer = Jt905Writer::new(&mut buf);

    let encoded = match mode {
        EscapeMode::Body => {
            writer.write_start()?;
            writer.write_array(body)?;
            writer.write_xor()?;
            writer.write_end()?;
            writer.write_encode()?;
            Bytes::copy_from_slice(writer.encoded())
        }
        EscapeMode::Full => {
            writer.write_array(body)?;
            writer.write_xor_from(0)?;
            writer.write_full_encode()?;

            let escaped = writer.encoded();
            let mut framed = BytesMut::with_capacity(escaped.len() + 2);
            framed.put_u8(BEGIN_FLAG);
            framed.put_slice(escaped);
            framed.put_u8(END_FLAG);
            framed.freeze()
        }
    };

    debug!(
        body = body.len(),
        encoded = encoded.len(),
        physical = writer.physical().len(),
        "frame built"
    );

    Ok(BuiltFrame {
        encoded,
        physical: Bytes::copy_from_slice(writer.physical()),
    })
}

/// Full escape transform of `bytes`, no framing
pub fn escape(bytes: &[u8]) -> Result<Bytes> {
    let mut buf = vec![0u8; bytes.len() * 3];
    let mut writer = Jt905Writer::new(&mut buf);
    writer.write_array(bytes)?;
    writer.write_full_encode()?;
    Ok(writer.encoded_bytes())
}
