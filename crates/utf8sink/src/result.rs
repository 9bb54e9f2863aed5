use crate::error::EncodeError;

/// Outcome of one encode call.
///
/// Named after the coder-result convention: `Underflow` means the encoder
/// ran out of *input*, i.e. everything was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeResult {
    /// The whole source range was encoded.
    Underflow,
    /// The destination could not hold the next code point.
    Overflow,
    /// An unpaired or mis-ordered surrogate sits at `position`.
    MalformedInput { position: usize },
}

impl EncodeResult {
    #[inline]
    #[must_use]
    pub fn is_underflow(self) -> bool {
        matches!(self, EncodeResult::Underflow)
    }

    #[inline]
    #[must_use]
    pub fn is_overflow(self) -> bool {
        matches!(self, EncodeResult::Overflow)
    }

    #[inline]
    #[must_use]
    pub fn is_malformed(self) -> bool {
        matches!(self, EncodeResult::MalformedInput { .. })
    }

    /// Turns the two failure variants into [`EncodeError`].
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::Overflow` or `EncodeError::MalformedInput` for
    /// the matching variant.
    pub fn into_result(self) -> Result<(), EncodeError> {
        match self {
            EncodeResult::Underflow => Ok(()),
            EncodeResult::Overflow => Err(EncodeError::Overflow),
            EncodeResult::MalformedInput { position } => {
                Err(EncodeError::MalformedInput { position })
            }
        }
    }
}

/// What the encode loop hands back: the result plus its frozen scratch
/// cursors.
///
/// `dest_pos` is the end of the last fully written code point and
/// `source_pos` the unit the loop stopped at (the source end on success).
/// Neither is a resume point; a failed string has to be encoded again from
/// its first code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    pub result: EncodeResult,
    pub source_pos: usize,
    pub dest_pos: usize,
}

impl Encoded {
    #[inline]
    pub(crate) fn new(result: EncodeResult, source_pos: usize, dest_pos: usize) -> Self {
        Self {
            result,
            source_pos,
            dest_pos,
        }
    }
}
