//! Incremental Decoder
//!
//! Owns the accumulation buffer and read cursor.

use bytes::{Bytes, BytesMut};

use crate::config::{BulkMode, DecoderConfig};
use crate::error::RespError;
use crate::protocol::parse_value;
use crate::value::Value;

/// Lifecycle state of a [`Decoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// No bytes buffered
    Empty,

    /// A partial value is buffered, waiting for more bytes
    Accumulating,

    /// The buffer was consumed exactly; passes straight back to `Empty`
    Draining,

    /// The last feed hit a syntax error and discarded its buffer
    Errored,
}

/// Result of a single [`Decoder::feed`] call
#[derive(Debug)]
#[must_use]
pub struct Feed {
    /// Complete values, in arrival order
    pub values: Vec<Value>,

    /// Syntax error that stopped the parse loop, if any.
    /// Values decoded before the error are still in `values`.
    pub error: Option<RespError>,

    /// Bytes held back for the next feed (or discarded, after `end`)
    pub buffered: usize,
}

impl Feed {
    /// `true` when no error occurred: every complete value was emitted and
    /// the decoder is waiting for more data.
    pub fn is_drained(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into the emitted values, or the error if one occurred.
    pub fn into_result(self) -> crate::Result<Vec<Value>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.values),
        }
    }
}

/// Stateful, chunk-tolerant RESP decoder.
///
/// Not synchronized: `feed` takes `&mut self`. Use
/// [`SharedDecoder`](super::SharedDecoder) to feed one decoder from several
/// threads.
///
/// In raw mode, bulk payloads are `Bytes` views into the accumulation
/// buffer. They stay valid after later feeds, but each one keeps the chunk
/// it points into alive; copy them if that matters.
#[derive(Debug)]
pub struct Decoder {
    config: DecoderConfig,

    /// Accumulated bytes; only `buffer[cursor..]` is still unparsed
    buffer: Bytes,

    /// Read position within `buffer`
    cursor: usize,

    state: DecoderState,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl Decoder {
    /// Create a decoder with the given configuration
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            buffer: Bytes::new(),
            cursor: 0,
            state: DecoderState::Empty,
        }
    }

    /// Create a decoder with default limits and the given bulk mode
    pub fn with_mode(mode: BulkMode) -> Self {
        Self::new(DecoderConfig {
            mode,
            ..DecoderConfig::default()
        })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Number of unparsed bytes retained from previous feeds
    pub fn buffered(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Appends `chunk` and decodes every complete value now available.
    ///
    /// On a syntax error the whole buffer is discarded; the decoder can be
    /// fed again afterwards and starts from a clean state.
    pub fn feed(&mut self, chunk: impl Into<Bytes>) -> Feed {
        if self.state == DecoderState::Errored {
            self.transition(DecoderState::Empty);
        }
        self.append(chunk.into());

        let mut values = Vec::new();
        while self.cursor < self.buffer.len() {
            match parse_value(&self.buffer, self.cursor, &self.config) {
                Ok(Some((value, next))) => {
                    tracing::trace!("Decoded value ending at byte {}: {:?}", next, value);
                    self.cursor = next;
                    values.push(value);
                }
                Ok(None) => {
                    // keep only the unparsed suffix; Bytes::slice shares the allocation
                    self.buffer = self.buffer.slice(self.cursor..);
                    self.cursor = 0;
                    self.transition(DecoderState::Accumulating);
                    tracing::trace!("Waiting for more data, {} bytes buffered", self.buffer.len());
                    return Feed {
                        values,
                        error: None,
                        buffered: self.buffer.len(),
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        "Syntax error at byte {} after {} values, discarding {} buffered bytes: {}",
                        self.cursor,
                        values.len(),
                        self.buffered(),
                        e
                    );
                    self.clear();
                    self.transition(DecoderState::Errored);
                    return Feed {
                        values,
                        error: Some(e.into()),
                        buffered: 0,
                    };
                }
            }
        }

        self.transition(DecoderState::Draining);
        self.clear();
        self.transition(DecoderState::Empty);
        Feed {
            values,
            error: None,
            buffered: 0,
        }
    }

    /// Feeds an optional final chunk and finishes the stream.
    ///
    /// Bytes of an incomplete trailing value are discarded; their count is
    /// reported in [`Feed::buffered`]. The decoder is `Empty` afterwards.
    pub fn end(&mut self, chunk: Option<Bytes>) -> Feed {
        let feed = match chunk {
            Some(chunk) => self.feed(chunk),
            None => Feed {
                values: Vec::new(),
                error: None,
                buffered: self.buffered(),
            },
        };

        if feed.buffered > 0 {
            tracing::warn!(
                "Stream ended with {} bytes of an incomplete value",
                feed.buffered
            );
        }
        self.reset();
        feed
    }

    /// Discards all buffered bytes
    pub fn reset(&mut self) {
        self.clear();
        self.transition(DecoderState::Empty);
    }

    fn append(&mut self, chunk: Bytes) {
        if self.buffered() == 0 {
            // nothing retained: adopt the chunk without copying
            self.buffer = chunk;
            self.cursor = 0;
            return;
        }

        let retained = &self.buffer[self.cursor..];
        let mut joined = BytesMut::with_capacity(retained.len() + chunk.len());
        joined.extend_from_slice(retained);
        joined.extend_from_slice(&chunk);
        self.buffer = joined.freeze();
        self.cursor = 0;
    }

    fn clear(&mut self) {
        self.buffer = Bytes::new();
        self.cursor = 0;
    }

    fn transition(&mut self, next: DecoderState) {
        if self.state != next {
            tracing::debug!("Decoder state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
