//! Allocation-free UTF-16 to UTF-8 encoding into caller-sized byte sinks.
//!
//! The encoder writes straight into a destination the caller has already
//! sized, either borrowed storage ([`SliceSink`]) or a raw region
//! ([`RawSink`]). A call either consumes the whole string and advances the
//! destination's position, or fails with the position untouched:
//!
//! ```rust
//! use utf8sink::{ByteSink, EncodeResult, SliceSink, Utf8Encoder};
//!
//! let text: Vec<u16> = "€€€".encode_utf16().collect();
//! let encoder = Utf8Encoder::default();
//!
//! let mut small = [0u8; 8];
//! let mut sink = SliceSink::new(&mut small);
//! assert_eq!(encoder.encode_string(&text, &mut sink), EncodeResult::Overflow);
//! assert_eq!(sink.position(), 0);
//!
//! // Not resumable: retry the whole string with room for it.
//! let mut big = [0u8; 9];
//! let mut sink = SliceSink::new(&mut big);
//! assert_eq!(encoder.encode_string(&text, &mut sink), EncodeResult::Underflow);
//! assert_eq!(sink.written(), "€€€".as_bytes());
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod encoder;
mod error;
mod options;
mod result;
mod sink;
mod source;
mod surrogate;

#[cfg(test)]
mod tests;

#[cfg(feature = "alloc-helpers")]
pub use encoder::encode_to_vec;
pub use encoder::{Utf8Encoder, encode, encoded_len};
pub use error::{EncodeError, SinkError, ViewError};
pub use options::EncoderOptions;
pub use result::{EncodeResult, Encoded};
pub use sink::{ByteSink, RawSink, SinkFull, SliceSink};
pub use source::{CodeUnitSource, Utf16View};
pub use surrogate::{
    Malformed, is_high_surrogate, is_low_surrogate, is_surrogate, resolve_pair,
};
