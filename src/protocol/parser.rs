//! Parser core
//!
//! Recursive descent over a buffered byte slice, keyed on the one-byte type
//! prefix. The parser never consumes its input: it reports the index just
//! past a complete value, or `None` when the value has not fully arrived,
//! so the caller can retry once more bytes are buffered.
//!
//! Raw-mode bulk payloads are `Bytes::slice()` views into the input buffer.

use bytes::Bytes;

use super::{ARRAY_PREFIX, BULK_PREFIX, ERROR_PREFIX, INTEGER_PREFIX, SIMPLE_PREFIX};
use crate::config::{BulkMode, DecoderConfig};
use crate::error::SyntaxError;
use crate::value::{Bulk, ErrorReply, Value};

/// Cap for `Vec::with_capacity` in array parsing. A large declared count
/// only grows the Vec as children actually parse.
const PREALLOC_CAP: usize = 1024;

/// A complete value and the index just past it, or `None` when the buffer
/// ends before the value does.
pub type Parsed = Option<(Value, usize)>;

/// Parses one value starting at `index`.
///
/// Returns `Ok(None)` when more data is needed, `Err` when the bytes
/// already buffered can never form a valid value.
pub fn parse_value(
    buf: &Bytes,
    index: usize,
    config: &DecoderConfig,
) -> Result<Parsed, SyntaxError> {
    parse_at(buf, index, config, 0)
}

fn parse_at(
    buf: &Bytes,
    index: usize,
    config: &DecoderConfig,
    depth: usize,
) -> Result<Parsed, SyntaxError> {
    // an array child that has not arrived yet
    let Some(&prefix) = buf.get(index) else {
        return Ok(None);
    };
    let start = index + 1;

    match prefix {
        SIMPLE_PREFIX => Ok(read_line(buf, start)
            .map(|(line, next)| (Value::Simple(lossy(line)), next))),
        ERROR_PREFIX => Ok(read_line(buf, start).map(|(line, next)| {
            let reply = ErrorReply::from_line(&lossy(line));
            (Value::Error(reply), next)
        })),
        INTEGER_PREFIX => {
            let Some((line, next)) = read_line(buf, start) else {
                return Ok(None);
            };
            Ok(Some((Value::Integer(parse_i64(line)?), next)))
        }
        BULK_PREFIX => parse_bulk(buf, start, config),
        ARRAY_PREFIX => parse_array(buf, start, config, depth),
        other => Err(SyntaxError::InvalidPrefix(other)),
    }
}

fn parse_bulk(buf: &Bytes, start: usize, config: &DecoderConfig) -> Result<Parsed, SyntaxError> {
    let Some((line, payload_start)) = read_line(buf, start) else {
        return Ok(None);
    };

    let len = parse_i64(line)?;
    if len == -1 {
        return Ok(Some((Value::Null, payload_start)));
    }
    if len < -1 {
        return Err(SyntaxError::InvalidLength(len));
    }
    if len > config.max_bulk_len {
        return Err(SyntaxError::BulkTooLarge(len));
    }

    // need `len` payload bytes plus the trailing \r\n
    let end = payload_start.saturating_add(len as usize);
    if buf.len() < end.saturating_add(2) {
        return Ok(None);
    }
    if &buf[end..end + 2] != b"\r\n" {
        return Err(SyntaxError::MissingCrlf);
    }

    let bulk = match config.mode {
        BulkMode::Raw => Bulk::Raw(buf.slice(payload_start..end)),
        BulkMode::Text => Bulk::Text(lossy(&buf[payload_start..end])),
    };
    Ok(Some((Value::Bulk(bulk), end + 2)))
}

fn parse_array(
    buf: &Bytes,
    start: usize,
    config: &DecoderConfig,
    depth: usize,
) -> Result<Parsed, SyntaxError> {
    let next_depth = depth + 1;
    if next_depth > config.max_depth {
        return Err(SyntaxError::NestingTooDeep(config.max_depth));
    }

    let Some((line, mut pos)) = read_line(buf, start) else {
        return Ok(None);
    };

    let count = parse_i64(line)?;
    if count == -1 {
        return Ok(Some((Value::Null, pos)));
    }
    if count < -1 {
        return Err(SyntaxError::InvalidLength(count));
    }
    if count > config.max_array_len {
        return Err(SyntaxError::TooManyElements(count));
    }

    let count = count as usize;
    let mut items = Vec::with_capacity(count.min(PREALLOC_CAP));
    for _ in 0..count {
        // a missing or malformed child abandons the whole array
        match parse_at(buf, pos, config, next_depth)? {
            Some((item, next)) => {
                items.push(item);
                pos = next;
            }
            None => return Ok(None),
        }
    }
    Ok(Some((Value::Array(items), pos)))
}

// ---------------------------------------------------------------------------
// low-level helpers
// ---------------------------------------------------------------------------

/// Returns the bytes from `start` up to the next `\r\n` and the index just
/// past it, or `None` if no terminator is buffered yet.
fn read_line(buf: &[u8], start: usize) -> Option<(&[u8], usize)> {
    if start >= buf.len() {
        return None;
    }

    let mut pos = start;
    while let Some(offset) = memchr::memchr(b'\r', &buf[pos..]) {
        let cr = pos + offset;
        if cr + 1 < buf.len() && buf[cr + 1] == b'\n' {
            return Some((&buf[start..cr], cr + 2));
        }
        // bare \r, keep scanning past it
        pos = cr + 1;
    }
    None
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses a strict base-10 i64: optional `-`, then one or more digits.
///
/// Negative numbers accumulate in the negative direction so that `i64::MIN`
/// is representable without overflow.
fn parse_i64(line: &[u8]) -> Result<i64, SyntaxError> {
    let invalid = || SyntaxError::InvalidInteger(lossy(line));

    let (negative, digits) = match line.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, line),
    };
    if digits.is_empty() {
        return Err(invalid());
    }

    let mut n: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(invalid());
        }
        let digit = (b - b'0') as i64;
        n = n
            .checked_mul(10)
            .and_then(|n| {
                if negative {
                    n.checked_sub(digit)
                } else {
                    n.checked_add(digit)
                }
            })
            .ok_or_else(invalid)?;
    }
    Ok(n)
}
