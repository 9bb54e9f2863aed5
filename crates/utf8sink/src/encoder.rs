//! The UTF-16 to UTF-8 encode loop and its string-level entry points.
//!
//! The loop is written once, generic over [`ByteSink`], and monomorphised
//! for each destination kind. It keeps its cursors on the stack; nothing
//! survives the call.
//!
//! Output follows the usual table:
//!
//! | code unit                  | bytes                                  |
//! |----------------------------|----------------------------------------|
//! | `..0x80`                   | `0xxxxxxx`                             |
//! | `0x80..0x800`              | `110xxxxx 10xxxxxx`                    |
//! | surrogate pair             | `11110xxx 10xxxxxx 10xxxxxx 10xxxxxx`  |
//! | other `0x800..=0xFFFF`     | `1110xxxx 10xxxxxx 10xxxxxx`           |

#[cfg(feature = "alloc-helpers")]
use alloc::{vec, vec::Vec};

use log::{debug, trace};

use crate::{
    error::EncodeError,
    options::EncoderOptions,
    result::{EncodeResult, Encoded},
    sink::ByteSink,
    source::CodeUnitSource,
    surrogate::{Malformed, is_surrogate, resolve_pair},
};

/// Encodes `source[source_start..source_end]` into `sink` starting at logical
/// index `dest_start`, never writing at or past `dest_limit`.
///
/// The sink's committed position is **not** touched; the returned
/// [`Encoded`] carries the scratch cursors and the caller decides whether to
/// commit. [`Utf8Encoder::encode_string`] commits only on
/// [`EncodeResult::Underflow`].
///
/// This call is not resumable. After `Overflow` or `MalformedInput` the
/// cursors in [`Encoded`] describe where the loop stopped, but the fix is
/// always to encode the string again from its start, with a bigger
/// destination or not at all.
///
/// `dest_limit` is clamped to `sink.limit()` and `source_end` to
/// `source.len()`.
pub fn encode<S: ByteSink + ?Sized>(
    source: &[u16],
    source_start: usize,
    source_end: usize,
    sink: &mut S,
    dest_start: usize,
    dest_limit: usize,
) -> Encoded {
    encode_with(
        source,
        source_start,
        source_end,
        sink,
        dest_start,
        dest_limit,
        true,
    )
}

#[allow(clippy::cast_possible_truncation)]
fn encode_with<S: ByteSink + ?Sized>(
    source: &[u16],
    source_start: usize,
    source_end: usize,
    sink: &mut S,
    dest_start: usize,
    dest_limit: usize,
    ascii_fast_path: bool,
) -> Encoded {
    let sl = source_end.min(source.len());
    let dl = dest_limit.min(sink.limit());
    let mut sp = source_start.min(sl);
    let mut dp = dest_start;

    if ascii_fast_path {
        let ascii_end = sp + (sl - sp).min(dl.saturating_sub(dp));
        while sp < ascii_end {
            let c = source[sp];
            if c >= 0x80 {
                break;
            }
            if sink.put_byte(dp, c as u8).is_err() {
                return Encoded::new(EncodeResult::Overflow, sp, dp);
            }
            sp += 1;
            dp += 1;
        }
    }

    while sp < sl {
        let c = source[sp];
        let (bytes, width, consumed) = if c < 0x80 {
            ([c as u8, 0, 0, 0], 1, 1)
        } else if c < 0x800 {
            ([0xC0 | (c >> 6) as u8, 0x80 | (c & 0x3F) as u8, 0, 0], 2, 1)
        } else if is_surrogate(c) {
            match resolve_pair(source, sp, sl) {
                Ok(uc) => (
                    [
                        0xF0 | (uc >> 18) as u8,
                        0x80 | ((uc >> 12) & 0x3F) as u8,
                        0x80 | ((uc >> 6) & 0x3F) as u8,
                        0x80 | (uc & 0x3F) as u8,
                    ],
                    4,
                    2,
                ),
                Err(Malformed { position }) => {
                    return Encoded::new(EncodeResult::MalformedInput { position }, sp, dp);
                }
            }
        } else {
            (
                [
                    0xE0 | (c >> 12) as u8,
                    0x80 | ((c >> 6) & 0x3F) as u8,
                    0x80 | (c & 0x3F) as u8,
                    0,
                ],
                3,
                1,
            )
        };

        if dl.saturating_sub(dp) < width {
            return Encoded::new(EncodeResult::Overflow, sp, dp);
        }
        for (i, &b) in bytes[..width].iter().enumerate() {
            if sink.put_byte(dp + i, b).is_err() {
                return Encoded::new(EncodeResult::Overflow, sp, dp);
            }
        }
        dp += width;
        sp += consumed;
    }

    Encoded::new(EncodeResult::Underflow, sp, dp)
}

/// Encodes whole strings into sinks, committing all or nothing.
///
/// Holds only its options, so one instance can be shared freely; every call
/// uses its own stack-local cursors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Encoder {
    options: EncoderOptions,
}

impl Utf8Encoder {
    #[must_use]
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> EncoderOptions {
        self.options
    }

    /// Encodes all of `src` into `dst`, from `dst.position()` up to
    /// `dst.limit()`.
    ///
    /// The position moves to the end of the output only on
    /// [`EncodeResult::Underflow`]. On `Overflow` or `MalformedInput` it keeps
    /// its old value; bytes past it may have been overwritten and must not be
    /// read.
    ///
    /// ```rust
    /// use utf8sink::{ByteSink, EncodeResult, SliceSink, Utf8Encoder};
    ///
    /// let text: Vec<u16> = "héllo".encode_utf16().collect();
    /// let mut buf = [0u8; 16];
    /// let mut sink = SliceSink::new(&mut buf);
    /// let result = Utf8Encoder::default().encode_string(&text, &mut sink);
    /// assert_eq!(result, EncodeResult::Underflow);
    /// assert_eq!(sink.written(), "héllo".as_bytes());
    /// ```
    pub fn encode_string<C, S>(&self, src: &C, dst: &mut S) -> EncodeResult
    where
        C: CodeUnitSource + ?Sized,
        S: ByteSink + ?Sized,
    {
        let view = src.code_units();
        let start = dst.position();
        let limit = dst.limit();
        let out = encode_with(
            view.backing(),
            view.offset(),
            view.end(),
            dst,
            start,
            limit,
            self.options.ascii_fast_path,
        );

        match out.result {
            EncodeResult::Underflow => {
                dst.set_position(out.dest_pos);
                trace!(
                    "encoded {} code units into {} bytes",
                    view.len(),
                    out.dest_pos - start
                );
            }
            EncodeResult::Overflow => {
                debug!(
                    "overflow at code unit {} with {} of {} bytes free; position left at {start}",
                    out.source_pos,
                    limit.saturating_sub(out.dest_pos),
                    limit.saturating_sub(start)
                );
            }
            EncodeResult::MalformedInput { position } => {
                debug!("unpaired surrogate at code unit {position}; position left at {start}");
            }
        }
        out.result
    }

    /// Like [`encode_string`](Self::encode_string), returning the number of
    /// bytes committed.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Overflow`] or [`EncodeError::MalformedInput`], with the
    /// sink's position unchanged.
    pub fn encode_string_checked<C, S>(&self, src: &C, dst: &mut S) -> Result<usize, EncodeError>
    where
        C: CodeUnitSource + ?Sized,
        S: ByteSink + ?Sized,
    {
        let before = dst.position();
        self.encode_string(src, dst).into_result()?;
        Ok(dst.position() - before)
    }
}

/// Exact UTF-8 length of `src`, for sizing a destination up front.
///
/// # Errors
///
/// [`EncodeError::MalformedInput`] at the first unpaired surrogate.
pub fn encoded_len<C: CodeUnitSource + ?Sized>(src: &C) -> Result<usize, EncodeError> {
    let view = src.code_units();
    let units = view.backing();
    let end = view.end();
    let mut sp = view.offset();
    let mut len = 0usize;
    while sp < end {
        let c = units[sp];
        if c < 0x80 {
            len += 1;
        } else if c < 0x800 {
            len += 2;
        } else if is_surrogate(c) {
            resolve_pair(units, sp, end)
                .map_err(|Malformed { position }| EncodeError::MalformedInput { position })?;
            len += 4;
            sp += 1;
        } else {
            len += 3;
        }
        sp += 1;
    }
    Ok(len)
}

/// Encodes `src` into a freshly allocated, exactly sized buffer.
///
/// # Errors
///
/// [`EncodeError::MalformedInput`] at the first unpaired surrogate.
#[cfg(feature = "alloc-helpers")]
pub fn encode_to_vec<C: CodeUnitSource + ?Sized>(src: &C) -> Result<Vec<u8>, EncodeError> {
    let mut out = vec![0u8; encoded_len(src)?];
    let mut sink = crate::sink::SliceSink::new(&mut out);
    Utf8Encoder::default().encode_string(src, &mut sink).into_result()?;
    Ok(out)
}
