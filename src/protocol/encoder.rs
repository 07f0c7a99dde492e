//! Encoder
//!
//! Pure value-to-bytes functions. Each call allocates and returns its own
//! buffer; integer lengths are formatted with `itoa` without touching the heap.

use std::fmt::Display;

use bytes::{BufMut, Bytes, BytesMut};

use super::{ARRAY_PREFIX, BULK_PREFIX, CRLF, ERROR_PREFIX, INTEGER_PREFIX, SIMPLE_PREFIX};
use crate::error::{RespError, Result};
use crate::value::{Bulk, ErrorReply, Value};

const NULL_BULK: &[u8] = b"$-1\r\n";
const NULL_ARRAY: &[u8] = b"*-1\r\n";

// =============================================================================
// Encoder Inputs
// =============================================================================

/// Element of an array passed to [`encode_array`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayItem {
    /// An already-encoded value, written as-is
    Encoded(Bytes),

    /// A nested list, encoded recursively as an array
    Nested(Vec<ArrayItem>),
}

impl From<Bytes> for ArrayItem {
    fn from(bytes: Bytes) -> Self {
        ArrayItem::Encoded(bytes)
    }
}

impl From<Vec<ArrayItem>> for ArrayItem {
    fn from(items: Vec<ArrayItem>) -> Self {
        ArrayItem::Nested(items)
    }
}

/// Argument of an outgoing request. Every variant becomes a bulk string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Text(String),
    Integer(i64),
    Raw(Bytes),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_owned())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Integer(n)
    }
}

impl From<Bytes> for Arg {
    fn from(b: Bytes) -> Self {
        Arg::Raw(b)
    }
}

impl From<Vec<u8>> for Arg {
    fn from(b: Vec<u8>) -> Self {
        Arg::Raw(Bytes::from(b))
    }
}

impl TryFrom<&Value> for Arg {
    type Error = RespError;

    /// Only scalar values can be sent as request arguments.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Simple(s) => Ok(Arg::Text(s.clone())),
            Value::Integer(n) => Ok(Arg::Integer(*n)),
            Value::Bulk(Bulk::Text(s)) => Ok(Arg::Text(s.clone())),
            Value::Bulk(Bulk::Raw(b)) => Ok(Arg::Raw(b.clone())),
            Value::Null => Err(RespError::EncodeType(
                "null cannot be a request argument".to_string(),
            )),
            Value::Error(e) => Err(RespError::EncodeType(format!(
                "error reply {:?} cannot be a request argument",
                e.to_string()
            ))),
            Value::Array(items) => Err(RespError::EncodeType(format!(
                "array of {} values cannot be a request argument",
                items.len()
            ))),
        }
    }
}

impl TryFrom<Value> for Arg {
    type Error = RespError;

    fn try_from(value: Value) -> Result<Self> {
        Arg::try_from(&value)
    }
}

// =============================================================================
// Encode Functions
// =============================================================================

/// Encode a null bulk: `$-1\r\n`
pub fn encode_null() -> Bytes {
    Bytes::from_static(NULL_BULK)
}

/// Encode a null array: `*-1\r\n`
pub fn encode_null_array() -> Bytes {
    Bytes::from_static(NULL_ARRAY)
}

/// Encode a simple string: `+<s>\r\n`
///
/// The caller guarantees `s` contains no CR or LF.
pub fn encode_simple_string(s: &str) -> Bytes {
    let mut dst = BytesMut::with_capacity(s.len() + 3);
    put_line(SIMPLE_PREFIX, s.as_bytes(), &mut dst);
    dst.freeze()
}

/// Encode an error: `-<name> <message>\r\n`
pub fn encode_error(err: &ErrorReply) -> Bytes {
    let mut dst = BytesMut::with_capacity(err.name.len() + err.message.len() + 4);
    put_error(err, &mut dst);
    dst.freeze()
}

/// Encode an integer: `:<n>\r\n`
pub fn encode_integer(n: i64) -> Bytes {
    let mut dst = BytesMut::with_capacity(24);
    put_header(INTEGER_PREFIX, n, &mut dst);
    dst.freeze()
}

/// Encode any value's natural string form as a bulk.
///
/// The length prefix is the byte length of the UTF-8 encoding.
pub fn encode_bulk(value: impl Display) -> Bytes {
    encode_raw_bulk(value.to_string().as_bytes())
}

/// Encode raw bytes as a bulk: `$<len>\r\n<bytes>\r\n`
pub fn encode_raw_bulk(data: &[u8]) -> Bytes {
    let mut dst = BytesMut::with_capacity(data.len() + 16);
    put_bulk(data, &mut dst);
    dst.freeze()
}

/// Encode an array of pre-encoded elements and nested lists
pub fn encode_array(items: &[ArrayItem]) -> Bytes {
    let mut dst = BytesMut::new();
    put_array(items, &mut dst);
    dst.freeze()
}

/// Encode an outgoing command: an array whose every element is a bulk.
///
/// Text and integers are bulk-encoded through their string form, raw bytes
/// as-is. An empty argument list is rejected.
pub fn encode_request(args: &[Arg]) -> Result<Bytes> {
    if args.is_empty() {
        return Err(RespError::EncodeType(
            "request must contain at least one argument".to_string(),
        ));
    }

    let mut dst = BytesMut::with_capacity(16 + args.len() * 16);
    put_header(ARRAY_PREFIX, args.len() as i64, &mut dst);
    for arg in args {
        match arg {
            Arg::Text(s) => put_bulk(s.as_bytes(), &mut dst),
            Arg::Integer(n) => {
                let mut buf = itoa::Buffer::new();
                put_bulk(buf.format(*n).as_bytes(), &mut dst);
            }
            Arg::Raw(b) => put_bulk(b, &mut dst),
        }
    }
    Ok(dst.freeze())
}

impl Value {
    /// Writes the full wire representation of this value into `dst`.
    ///
    /// `Null` is written as a null bulk.
    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            Value::Null => dst.put_slice(NULL_BULK),
            Value::Simple(s) => put_line(SIMPLE_PREFIX, s.as_bytes(), dst),
            Value::Error(e) => put_error(e, dst),
            Value::Integer(n) => put_header(INTEGER_PREFIX, *n, dst),
            Value::Bulk(b) => put_bulk(b.as_bytes(), dst),
            Value::Array(items) => {
                put_header(ARRAY_PREFIX, items.len() as i64, dst);
                for item in items {
                    item.encode(dst);
                }
            }
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::new();
        self.encode(&mut dst);
        dst.freeze()
    }
}

// =============================================================================
// Buffer Helpers
// =============================================================================

fn put_line(prefix: u8, line: &[u8], dst: &mut BytesMut) {
    dst.put_u8(prefix);
    dst.put_slice(line);
    dst.put_slice(CRLF);
}

fn put_error(err: &ErrorReply, dst: &mut BytesMut) {
    dst.put_u8(ERROR_PREFIX);
    dst.put_slice(err.name.as_bytes());
    dst.put_u8(b' ');
    dst.put_slice(err.message.as_bytes());
    dst.put_slice(CRLF);
}

/// Writes `<prefix><n>\r\n`.
fn put_header(prefix: u8, n: i64, dst: &mut BytesMut) {
    let mut buf = itoa::Buffer::new();
    put_line(prefix, buf.format(n).as_bytes(), dst);
}

fn put_bulk(data: &[u8], dst: &mut BytesMut) {
    put_header(BULK_PREFIX, data.len() as i64, dst);
    dst.put_slice(data);
    dst.put_slice(CRLF);
}

fn put_array(items: &[ArrayItem], dst: &mut BytesMut) {
    put_header(ARRAY_PREFIX, items.len() as i64, dst);
    for item in items {
        match item {
            ArrayItem::Encoded(bytes) => dst.put_slice(bytes),
            ArrayItem::Nested(nested) => put_array(nested, dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls() {
        assert_eq!(&encode_null()[..], b"$-1\r\n");
        assert_eq!(&encode_null_array()[..], b"*-1\r\n");
    }

    #[test]
    fn simple_string() {
        assert_eq!(&encode_simple_string("OK")[..], b"+OK\r\n");
        assert_eq!(&encode_simple_string("")[..], b"+\r\n");
    }

    #[test]
    fn error() {
        assert_eq!(
            &encode_error(&ErrorReply::new("Error", "error"))[..],
            b"-Error error\r\n"
        );
        assert_eq!(
            &encode_error(&ErrorReply::new("TypeError", "error"))[..],
            b"-TypeError error\r\n"
        );
    }

    #[test]
    fn integer() {
        assert_eq!(&encode_integer(123)[..], b":123\r\n");
        assert_eq!(&encode_integer(-1)[..], b":-1\r\n");
        assert_eq!(
            &encode_integer(1456061893587000000)[..],
            b":1456061893587000000\r\n"
        );
        assert_eq!(&encode_integer(i64::MIN)[..], b":-9223372036854775808\r\n");
    }

    #[test]
    fn bulk_uses_natural_string_form() {
        assert_eq!(&encode_bulk("message")[..], b"$7\r\nmessage\r\n");
        assert_eq!(&encode_bulk(123)[..], b"$3\r\n123\r\n");
        assert_eq!(&encode_bulk(-1)[..], b"$2\r\n-1\r\n");
        assert_eq!(&encode_bulk("")[..], b"$0\r\n\r\n");
        assert_eq!(&encode_bulk(1.5)[..], b"$3\r\n1.5\r\n");
    }

    #[test]
    fn bulk_length_counts_utf8_bytes() {
        assert_eq!(&encode_bulk("中文")[..], "$6\r\n中文\r\n".as_bytes());
    }

    #[test]
    fn raw_bulk() {
        assert_eq!(&encode_raw_bulk(b"buf")[..], b"$3\r\nbuf\r\n");
        assert_eq!(&encode_raw_bulk(b"")[..], b"$0\r\n\r\n");
        assert_eq!(
            &encode_raw_bulk(&[0x00, 0xff, b'\r', b'\n'])[..],
            b"$4\r\n\x00\xff\r\n\r\n"
        );
    }

    #[test]
    fn array_of_encoded_and_nested() {
        assert_eq!(&encode_array(&[])[..], b"*0\r\n");
        let items = vec![
            ArrayItem::from(encode_null()),
            ArrayItem::from(encode_simple_string("OK")),
            ArrayItem::Nested(vec![]),
        ];
        assert_eq!(&encode_array(&items)[..], b"*3\r\n$-1\r\n+OK\r\n*0\r\n");

        let nested = vec![ArrayItem::Nested(vec![ArrayItem::from(encode_integer(1))])];
        assert_eq!(&encode_array(&nested)[..], b"*1\r\n*1\r\n:1\r\n");
    }

    #[test]
    fn request_framing() {
        let encoded = encode_request(&["set".into(), "key".into(), Arg::Integer(123)]).unwrap();
        assert_eq!(&encoded[..], b"*3\r\n$3\r\nset\r\n$3\r\nkey\r\n$3\r\n123\r\n");

        let raw = encode_request(&[
            "set".into(),
            "key".into(),
            Arg::Raw(Bytes::from_static(b"123")),
        ])
        .unwrap();
        assert_eq!(raw, encoded);

        assert_eq!(&encode_request(&["".into()]).unwrap()[..], b"*1\r\n$0\r\n\r\n");
        assert_eq!(
            &encode_request(&["info".into()]).unwrap()[..],
            b"*1\r\n$4\r\ninfo\r\n"
        );
    }

    #[test]
    fn empty_request_rejected() {
        let err = encode_request(&[]).unwrap_err();
        assert!(matches!(err, RespError::EncodeType(_)));
    }

    #[test]
    fn arg_from_value() {
        assert_eq!(Arg::try_from(Value::Integer(7)).unwrap(), Arg::Integer(7));
        assert_eq!(
            Arg::try_from(&Value::bulk("k")).unwrap(),
            Arg::Text("k".into())
        );
        assert!(matches!(
            Arg::try_from(Value::Null),
            Err(RespError::EncodeType(_))
        ));
        assert!(matches!(
            Arg::try_from(Value::Array(vec![])),
            Err(RespError::EncodeType(_))
        ));
        assert!(matches!(
            Arg::try_from(Value::Error(ErrorReply::new("ERR", "x"))),
            Err(RespError::EncodeType(_))
        ));
    }

    #[test]
    fn value_encode() {
        let value = Value::Array(vec![
            Value::Null,
            Value::simple("OK"),
            Value::Error(ErrorReply::new("ERR", "bad thing")),
            Value::Integer(-5),
            Value::bulk("hi"),
            Value::Array(vec![]),
        ]);
        assert_eq!(
            &value.to_bytes()[..],
            b"*6\r\n$-1\r\n+OK\r\n-ERR bad thing\r\n:-5\r\n$2\r\nhi\r\n*0\r\n"
        );
    }
}
