//! Bounded byte destinations.
//!
//! The encoder only ever needs one operation from its destination: write a
//! byte at a logical index, refusing anything at or past the limit.
//! [`ByteSink`] is that operation plus the cursor the encoder commits on
//! success. Two sinks implement it:
//!
//! - [`SliceSink`] indexes a borrowed `&mut [u8]`, optionally starting at an
//!   offset into it.
//! - [`RawSink`] writes through a base pointer, for regions that are not
//!   handed to us as a slice (memory shared with native I/O and the like).
//!
//! Both keep `position <= limit <= capacity`.

use core::{fmt, marker::PhantomData, ptr::NonNull};

use bstr::BStr;

use crate::error::SinkError;

/// A write was attempted at or past the sink's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFull;

/// Destination for encoded bytes.
///
/// Indices are logical: `0` is the first byte of the destination regardless
/// of where it lives in memory.
pub trait ByteSink {
    /// The committed cursor. Bytes before it are valid output.
    fn position(&self) -> usize;

    /// Exclusive upper bound for writes.
    fn limit(&self) -> usize;

    /// Writes `byte` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkFull`] without touching memory if `index >= limit()`.
    fn put_byte(&mut self, index: usize, byte: u8) -> Result<(), SinkFull>;

    /// Moves the committed cursor, saturating at `limit()`.
    fn set_position(&mut self, position: usize);
}

/// Cursor bookkeeping shared by both sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    position: usize,
    limit: usize,
    capacity: usize,
}

impl Window {
    fn full(capacity: usize) -> Self {
        Self {
            position: 0,
            limit: capacity,
            capacity,
        }
    }

    fn set_limit(&mut self, limit: usize) -> Result<(), SinkError> {
        if limit > self.capacity {
            return Err(SinkError::LimitOutOfBounds {
                limit,
                capacity: self.capacity,
            });
        }
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }

    fn try_set_position(&mut self, position: usize) -> Result<(), SinkError> {
        if position > self.limit {
            return Err(SinkError::PositionOutOfBounds {
                position,
                limit: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    fn set_position_saturating(&mut self, position: usize) {
        self.position = position.min(self.limit);
    }

    fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity;
    }

    fn remaining(&self) -> usize {
        self.limit - self.position
    }
}

/// A sink over borrowed, indexable storage.
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    offset: usize,
    window: Window,
}

impl<'a> SliceSink<'a> {
    /// Uses the whole of `buf`, starting empty.
    pub fn new(buf: &'a mut [u8]) -> Self {
        let window = Window::full(buf.len());
        Self {
            buf,
            offset: 0,
            window,
        }
    }

    /// Uses `buf[offset..offset + limit]`; logical index 0 is `buf[offset]`.
    ///
    /// # Errors
    ///
    /// [`SinkError::WindowOutOfBounds`] if the window does not fit in `buf`.
    pub fn with_window(buf: &'a mut [u8], offset: usize, limit: usize) -> Result<Self, SinkError> {
        let len = buf.len();
        match offset.checked_add(limit) {
            Some(end) if end <= len => Ok(Self {
                buf,
                offset,
                window: Window::full(limit),
            }),
            _ => Err(SinkError::WindowOutOfBounds { offset, limit, len }),
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.window.capacity
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.window.remaining()
    }

    /// Narrows or widens the writable region. The position is pulled back
    /// if it would end up past the new limit.
    ///
    /// # Errors
    ///
    /// [`SinkError::LimitOutOfBounds`] if `limit` exceeds the capacity.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), SinkError> {
        self.window.set_limit(limit)
    }

    /// # Errors
    ///
    /// [`SinkError::PositionOutOfBounds`] if `position` exceeds the limit.
    pub fn try_set_position(&mut self, position: usize) -> Result<(), SinkError> {
        self.window.try_set_position(position)
    }

    /// Resets position to 0 and limit to capacity, ready for the next string.
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// The committed output, `[0, position)`.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf[self.offset..self.offset + self.window.position]
    }
}

impl ByteSink for SliceSink<'_> {
    #[inline]
    fn position(&self) -> usize {
        self.window.position
    }

    #[inline]
    fn limit(&self) -> usize {
        self.window.limit
    }

    #[inline]
    fn put_byte(&mut self, index: usize, byte: u8) -> Result<(), SinkFull> {
        if index >= self.window.limit {
            return Err(SinkFull);
        }
        match self.buf.get_mut(self.offset + index) {
            Some(slot) => {
                *slot = byte;
                Ok(())
            }
            None => Err(SinkFull),
        }
    }

    #[inline]
    fn set_position(&mut self, position: usize) {
        self.window.set_position_saturating(position);
    }
}

impl fmt::Debug for SliceSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceSink")
            .field("offset", &self.offset)
            .field("position", &self.window.position)
            .field("limit", &self.window.limit)
            .field("capacity", &self.window.capacity)
            .field("written", &BStr::new(self.written()))
            .finish()
    }
}

/// A sink over a region addressed by a base pointer.
///
/// Logical index `i` lands at `base + i`. The pointer is never dereferenced
/// at or beyond the limit, so an undersized region shows up as an overflow
/// rather than a stray write.
pub struct RawSink<'a> {
    base: NonNull<u8>,
    window: Window,
    _region: PhantomData<&'a mut [u8]>,
}

impl<'a> RawSink<'a> {
    /// Addresses the memory behind `buf` through its base pointer.
    pub fn from_mut_slice(buf: &'a mut [u8]) -> Self {
        let capacity = buf.len();
        Self {
            base: NonNull::from(buf).cast::<u8>(),
            window: Window::full(capacity),
            _region: PhantomData,
        }
    }

    /// Wraps `capacity` bytes starting at `base`.
    ///
    /// # Safety
    ///
    /// For the whole lifetime `'a`, `base..base + capacity` must be valid for
    /// reads and writes, initialized, and not accessed through any other
    /// pointer or reference.
    pub unsafe fn from_raw_parts(base: NonNull<u8>, capacity: usize) -> Self {
        Self {
            base,
            window: Window::full(capacity),
            _region: PhantomData,
        }
    }

    #[must_use]
    pub fn base(&self) -> NonNull<u8> {
        self.base
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.window.capacity
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.window.remaining()
    }

    /// # Errors
    ///
    /// [`SinkError::LimitOutOfBounds`] if `limit` exceeds the capacity.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), SinkError> {
        self.window.set_limit(limit)
    }

    /// # Errors
    ///
    /// [`SinkError::PositionOutOfBounds`] if `position` exceeds the limit.
    pub fn try_set_position(&mut self, position: usize) -> Result<(), SinkError> {
        self.window.try_set_position(position)
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// The committed output, `[0, position)`.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        // SAFETY: position <= capacity and the region is valid for reads for
        // 'a, per both constructors.
        unsafe { core::slice::from_raw_parts(self.base.as_ptr(), self.window.position) }
    }
}

impl ByteSink for RawSink<'_> {
    #[inline]
    fn position(&self) -> usize {
        self.window.position
    }

    #[inline]
    fn limit(&self) -> usize {
        self.window.limit
    }

    #[inline]
    fn put_byte(&mut self, index: usize, byte: u8) -> Result<(), SinkFull> {
        if index >= self.window.limit {
            return Err(SinkFull);
        }
        // SAFETY: index < limit <= capacity, and the region is valid for
        // writes of `capacity` bytes.
        unsafe { self.base.add(index).write(byte) };
        Ok(())
    }

    #[inline]
    fn set_position(&mut self, position: usize) {
        self.window.set_position_saturating(position);
    }
}

impl fmt::Debug for RawSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSink")
            .field("base", &self.base)
            .field("position", &self.window.position)
            .field("limit", &self.window.limit)
            .field("capacity", &self.window.capacity)
            .field("written", &BStr::new(self.written()))
            .finish()
    }
}
