//! Thread-shareable decoder handle.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use super::{Decoder, DecoderState, Feed};
use crate::config::DecoderConfig;

/// A [`Decoder`] behind a mutex, so several threads can feed one stream.
///
/// Each `feed` runs under the lock, so the values of one call are never
/// interleaved with another's. Chunk order across threads is whatever order
/// the callers take the lock in.
#[derive(Debug, Clone, Default)]
pub struct SharedDecoder {
    inner: Arc<Mutex<Decoder>>,
}

impl SharedDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Decoder::new(config))),
        }
    }

    pub fn feed(&self, chunk: impl Into<Bytes>) -> Feed {
        self.inner.lock().feed(chunk)
    }

    pub fn end(&self, chunk: Option<Bytes>) -> Feed {
        self.inner.lock().end(chunk)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn state(&self) -> DecoderState {
        self.inner.lock().state()
    }

    pub fn buffered(&self) -> usize {
        self.inner.lock().buffered()
    }
}
