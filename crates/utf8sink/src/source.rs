//! Zero-copy access to UTF-16 input.

use alloc::vec::Vec;

use crate::error::ViewError;

/// A borrowed run of UTF-16 code units inside a possibly larger backing
/// sequence.
///
/// Positions reported by the encoder are indices into the *backing*
/// sequence, so a view that starts at `offset` 10 reports a bad unit at its
/// own index 0 as position 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf16View<'a> {
    backing: &'a [u16],
    offset: usize,
    len: usize,
}

impl<'a> Utf16View<'a> {
    /// A view of `len` units starting at `offset` in `backing`.
    ///
    /// # Errors
    ///
    /// [`ViewError::OutOfBounds`] if the range does not fit in `backing`.
    pub fn new(backing: &'a [u16], offset: usize, len: usize) -> Result<Self, ViewError> {
        match offset.checked_add(len) {
            Some(end) if end <= backing.len() => Ok(Self {
                backing,
                offset,
                len,
            }),
            _ => Err(ViewError::OutOfBounds {
                offset,
                len,
                backing: backing.len(),
            }),
        }
    }

    /// The whole of `units`.
    #[must_use]
    pub fn from_units(units: &'a [u16]) -> Self {
        Self {
            backing: units,
            offset: 0,
            len: units.len(),
        }
    }

    /// A narrower view sharing the same backing; `start` is relative to this
    /// view.
    ///
    /// # Errors
    ///
    /// [`ViewError::OutOfBounds`] if the range leaves this view.
    pub fn sub_view(&self, start: usize, len: usize) -> Result<Self, ViewError> {
        let fits = start.checked_add(len).is_some_and(|end| end <= self.len);
        if !fits {
            return Err(ViewError::OutOfBounds {
                offset: self.offset.saturating_add(start),
                len,
                backing: self.backing.len(),
            });
        }
        Ok(Self {
            backing: self.backing,
            offset: self.offset + start,
            len,
        })
    }

    #[must_use]
    pub fn backing(&self) -> &'a [u16] {
        self.backing
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive end of the view in backing coordinates.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    #[must_use]
    pub fn as_units(&self) -> &'a [u16] {
        &self.backing[self.offset..self.end()]
    }
}

/// Anything that can lend its UTF-16 code units without copying.
pub trait CodeUnitSource {
    fn code_units(&self) -> Utf16View<'_>;
}

impl CodeUnitSource for [u16] {
    fn code_units(&self) -> Utf16View<'_> {
        Utf16View::from_units(self)
    }
}

impl<const N: usize> CodeUnitSource for [u16; N] {
    fn code_units(&self) -> Utf16View<'_> {
        Utf16View::from_units(self)
    }
}

impl CodeUnitSource for Vec<u16> {
    fn code_units(&self) -> Utf16View<'_> {
        Utf16View::from_units(self)
    }
}

impl CodeUnitSource for Utf16View<'_> {
    fn code_units(&self) -> Utf16View<'_> {
        *self
    }
}
