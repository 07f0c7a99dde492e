//! Decoder Module
//!
//! Turns arbitrarily-chunked bytes into complete values.
//!
//! ## Responsibilities
//! - Accumulate chunks until whole values are available
//! - Emit values in arrival order, including pipelined values
//! - Discard all buffered state on a syntax error
//! - One-shot decoding of complete buffers
//!
//! ## State Machine
//! ```text
//!            feed                 partial value
//!  ┌───────┐ ───▶ ┌──────────────┐ ◀──────────┐
//!  │ Empty │      │ Accumulating │ ───────────┘
//!  └───────┘ ◀─── └──────────────┘
//!      ▲  Draining │        │ syntax error
//!      │           ▼        ▼
//!      └────────────── ┌─────────┐
//!          next feed   │ Errored │
//!                      └─────────┘
//! ```

mod incremental;
mod oneshot;
mod shared;

pub use incremental::{Decoder, DecoderState, Feed};
pub use oneshot::{decode, decode_exact};
pub use shared::SharedDecoder;
