//! RESP value types
//!
//! [`Value`] is a single decoded protocol value. Raw bulk payloads use
//! `Bytes`, which in raw mode is a reference-counted view into the
//! decoder's accumulation buffer rather than a copy.

use std::fmt;

use bytes::Bytes;

/// Name given to error replies whose line carries no leading token
pub const DEFAULT_ERROR_NAME: &str = "Error";

/// A single RESP value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Null bulk (`$-1\r\n`) or null array (`*-1\r\n`).
    Null,

    /// Simple string, e.g. `+OK\r\n`.
    Simple(String),

    /// Error reply, e.g. `-ERR unknown command\r\n`.
    Error(ErrorReply),

    /// 64-bit signed integer, e.g. `:42\r\n`.
    Integer(i64),

    /// Length-prefixed payload, e.g. `$5\r\nhello\r\n`.
    Bulk(Bulk),

    /// Ordered array of values, e.g. `*2\r\n:1\r\n:2\r\n`.
    Array(Vec<Value>),
}

impl Value {
    /// Text bulk value.
    pub fn bulk(text: impl Into<String>) -> Self {
        Value::Bulk(Bulk::Text(text.into()))
    }

    /// Raw bulk value.
    pub fn raw(bytes: impl Into<Bytes>) -> Self {
        Value::Bulk(Bulk::Raw(bytes.into()))
    }

    pub fn simple(text: impl Into<String>) -> Self {
        Value::Simple(text.into())
    }

    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Bytes of a simple string or bulk.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Simple(s) => Some(s.as_bytes()),
            Value::Bulk(b) => Some(b.as_bytes()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Bulk payload, materialized as text or raw bytes depending on decoder mode.
///
/// Equality compares content only: `Text("abc") == Raw(b"abc")`.
#[derive(Debug, Clone)]
pub enum Bulk {
    Text(String),
    Raw(Bytes),
}

impl Bulk {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Bulk::Text(s) => s.as_bytes(),
            Bulk::Raw(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the payload into owned bytes (a cheap clone for raw bulks).
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Bulk::Text(s) => Bytes::copy_from_slice(s.as_bytes()),
            Bulk::Raw(b) => b.clone(),
        }
    }
}

impl PartialEq for Bulk {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Bulk {}

/// An error reply: a leading name token and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReply {
    pub name: String,
    pub message: String,
}

impl ErrorReply {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Splits an error line into name and message.
    ///
    /// The name is the text before the first space when it is a non-empty,
    /// whitespace-free token followed by a non-empty message. Any other line
    /// gets [`DEFAULT_ERROR_NAME`] and keeps the whole line as its message.
    pub fn from_line(line: &str) -> Self {
        if let Some((name, message)) = line.split_once(' ') {
            if !name.is_empty() && !name.contains(char::is_whitespace) && !message.is_empty() {
                return Self::new(name, message);
            }
        }
        Self::new(DEFAULT_ERROR_NAME, line)
    }
}

impl fmt::Display for ErrorReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.message)
    }
}

impl std::error::Error for ErrorReply {}
