//! Protocol Module
//!
//! Defines the RESP wire grammar shared by the encoder and the parser core.
//!
//! ## Wire Grammar
//!
//! ```text
//! SimpleString := '+' <text, no CR/LF> CRLF
//! Error        := '-' <name> ' ' <message> CRLF   | '-' <message> CRLF
//! Integer      := ':' <decimal i64> CRLF
//! Bulk         := '$' <length> CRLF <length bytes> CRLF | '$-1' CRLF
//! Array        := '*' <count> CRLF <count values>       | '*-1' CRLF
//! ```
//!
//! ### Type Prefixes
//! - `+`: simple string
//! - `-`: error
//! - `:`: integer
//! - `$`: bulk (null when length is -1)
//! - `*`: array (null when count is -1)

mod encoder;
mod parser;

pub use encoder::{
    encode_array, encode_bulk, encode_error, encode_integer, encode_null, encode_null_array,
    encode_raw_bulk, encode_request, encode_simple_string, Arg, ArrayItem,
};
pub use parser::{parse_value, Parsed};

/// Line terminator
pub const CRLF: &[u8] = b"\r\n";

pub const SIMPLE_PREFIX: u8 = b'+';
pub const ERROR_PREFIX: u8 = b'-';
pub const INTEGER_PREFIX: u8 = b':';
pub const BULK_PREFIX: u8 = b'$';
pub const ARRAY_PREFIX: u8 = b'*';
