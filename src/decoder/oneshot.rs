//! One-shot decoding of complete buffers.

use bytes::Bytes;

use crate::config::DecoderConfig;
use crate::error::{RespError, Result, SyntaxError};
use crate::protocol::parse_value;
use crate::value::Value;

/// Decodes a buffer holding exactly one value.
///
/// An incomplete value is [`SyntaxError::Incomplete`]; trailing bytes are
/// [`RespError::SurplusData`].
pub fn decode(buf: impl Into<Bytes>, config: &DecoderConfig) -> Result<Value> {
    decode_exact(buf, 1, config)?
        .pop()
        .ok_or_else(|| RespError::from(SyntaxError::Incomplete))
}

/// Decodes a buffer holding exactly `count` values.
pub fn decode_exact(
    buf: impl Into<Bytes>,
    count: usize,
    config: &DecoderConfig,
) -> Result<Vec<Value>> {
    let buf = buf.into();
    let mut values = Vec::with_capacity(count.min(64));
    let mut pos = 0;

    for _ in 0..count {
        match parse_value(&buf, pos, config)? {
            Some((value, next)) => {
                values.push(value);
                pos = next;
            }
            None => return Err(SyntaxError::Incomplete.into()),
        }
    }

    if pos < buf.len() {
        return Err(RespError::SurplusData {
            consumed: pos,
            remaining: buf.len() - pos,
        });
    }
    Ok(values)
}
