//! # respwire
//!
//! An incremental codec for the RESP wire protocol:
//! - Byte-exact encoder for simple strings, errors, integers, bulks and arrays
//! - Chunk-tolerant decoder for values split across reads or pipelined
//! - Configurable nesting and length limits against hostile input
//! - Text or zero-copy raw bulk payloads
//!
//! ## Architecture Overview
//!
//! ```text
//!  transport chunks                      application
//!        │                                    ▲
//!        ▼                                    │ Vec<Value>
//! ┌──────────────┐   parse_value   ┌──────────┴──────┐
//! │   Decoder    │ ──────────────▶ │   Parser core   │
//! │ buffer+cursor│ ◀────────────── │ (recursive)     │
//! └──────────────┘  value / more   └─────────────────┘
//!
//!  application ──▶ encode_* ──▶ Bytes ──▶ transport
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use bytes::Bytes;
//! use respwire::{encode_request, Decoder, Value};
//!
//! let request = encode_request(&["set".into(), "key".into(), 123i64.into()]).unwrap();
//! assert_eq!(&request[..], b"*3\r\n$3\r\nset\r\n$3\r\nkey\r\n$3\r\n123\r\n");
//!
//! let mut decoder = Decoder::default();
//! assert!(decoder.feed(Bytes::from_static(b"$3\r\nfo")).values.is_empty());
//! let feed = decoder.feed(Bytes::from_static(b"o\r\n"));
//! assert_eq!(feed.values, vec![Value::bulk("foo")]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod decoder;
pub mod format;
pub mod protocol;
pub mod stream;
pub mod value;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{BulkMode, DecoderConfig};
pub use decoder::{decode, decode_exact, Decoder, DecoderState, Feed, SharedDecoder};
pub use error::{RespError, Result, SyntaxError};
pub use protocol::{
    encode_array, encode_bulk, encode_error, encode_integer, encode_null, encode_null_array,
    encode_raw_bulk, encode_request, encode_simple_string, Arg, ArrayItem,
};
pub use value::{Bulk, ErrorReply, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of respwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
