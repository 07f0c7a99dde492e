//! Stream-based I/O helpers
//!
//! Drive a [`Decoder`] from any `Read` and write encoded values to any
//! `Write`. The transport itself stays the caller's concern.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};

use crate::decoder::Decoder;
use crate::error::{RespError, Result, SyntaxError};
use crate::protocol::{encode_request, Arg};
use crate::value::Value;

/// Default read size per chunk (8 KB)
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Read until EOF, returning every value decoded
///
/// Returns the first syntax error encountered. Bytes of an incomplete value
/// at EOF are [`SyntaxError::Incomplete`].
pub fn read_values<R: Read>(
    reader: &mut R,
    decoder: &mut Decoder,
    chunk_size: usize,
) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    let mut chunk = vec![0u8; chunk_size.max(1)];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        let feed = decoder.feed(Bytes::copy_from_slice(&chunk[..n]));
        values.extend(feed.values);
        if let Some(e) = feed.error {
            return Err(e);
        }
    }

    if decoder.end(None).buffered > 0 {
        return Err(SyntaxError::Incomplete.into());
    }
    Ok(values)
}

/// Pull iterator over values decoded from a reader
///
/// Yields values in arrival order. After an error (I/O, syntax, or an
/// incomplete value at EOF) the iterator is exhausted.
pub struct ValueReader<R> {
    reader: R,
    decoder: Decoder,
    chunk_size: usize,
    pending: VecDeque<Value>,
    error: Option<RespError>,
    done: bool,
}

impl<R: Read> ValueReader<R> {
    /// Create a reader with a default text-mode decoder
    pub fn new(reader: R) -> Self {
        Self::with_decoder(reader, Decoder::default(), DEFAULT_CHUNK_SIZE)
    }

    pub fn with_decoder(reader: R, decoder: Decoder, chunk_size: usize) -> Self {
        Self {
            reader,
            decoder,
            chunk_size: chunk_size.max(1),
            pending: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    /// Reads one chunk and feeds it. Returns `false` at EOF.
    fn fill(&mut self) -> Result<bool> {
        let mut chunk = vec![0u8; self.chunk_size];
        let n = loop {
            match self.reader.read(&mut chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if n == 0 {
            let finish = self.decoder.end(None);
            if finish.buffered > 0 {
                return Err(SyntaxError::Incomplete.into());
            }
            return Ok(false);
        }

        chunk.truncate(n);
        let feed = self.decoder.feed(chunk);
        self.pending.extend(feed.values);
        if let Some(e) = feed.error {
            // surfaced after the values that preceded it
            self.error = Some(e);
            self.done = true;
        }
        Ok(true)
    }
}

impl<R: Read> Iterator for ValueReader<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.pending.pop_front() {
                return Some(Ok(value));
            }
            if let Some(e) = self.error.take() {
                return Some(Err(e));
            }
            if self.done {
                return None;
            }
            match self.fill() {
                Ok(true) => {}
                Ok(false) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Write a value to a stream
pub fn write_value<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    let mut buf = BytesMut::new();
    value.encode(&mut buf);
    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}

/// Write a request (array of bulks) to a stream
pub fn write_request<W: Write>(writer: &mut W, args: &[Arg]) -> Result<()> {
    let bytes = encode_request(args)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
