//! Surrogate pair validation.
//!
//! A scalar value above `0xFFFF` is carried in UTF-16 as a high surrogate
//! (`0xD800..=0xDBFF`) immediately followed by a low surrogate
//! (`0xDC00..=0xDFFF`). Anything else that touches the surrogate range is
//! malformed and is reported at the index of the unit that started the
//! attempt.

const HIGH_START: u16 = 0xD800;
const LOW_START: u16 = 0xDC00;
const LOW_END: u16 = 0xDFFF;

/// A surrogate sequence that could not be paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Malformed {
    /// Index of the unit where pairing failed.
    pub position: usize,
}

#[inline]
#[must_use]
pub fn is_surrogate(unit: u16) -> bool {
    (HIGH_START..=LOW_END).contains(&unit)
}

#[inline]
#[must_use]
pub fn is_high_surrogate(unit: u16) -> bool {
    (HIGH_START..LOW_START).contains(&unit)
}

#[inline]
#[must_use]
pub fn is_low_surrogate(unit: u16) -> bool {
    (LOW_START..=LOW_END).contains(&unit)
}

/// Combines the surrogate pair starting at `units[pos]` into a scalar value.
///
/// `source_end` is the exclusive end of the range being encoded; a high
/// surrogate at `source_end - 1` has no partner even if the backing slice
/// continues past it.
///
/// # Errors
///
/// Fails at `pos` if `units[pos]` is a low surrogate, if there is no unit
/// after it inside the range, or if that unit is not a low surrogate.
#[inline]
pub fn resolve_pair(units: &[u16], pos: usize, source_end: usize) -> Result<u32, Malformed> {
    let err = Malformed { position: pos };
    let high = *units.get(pos).ok_or(err)?;
    if !is_high_surrogate(high) {
        return Err(err);
    }
    let next = pos + 1;
    if next >= source_end {
        return Err(err);
    }
    let low = *units.get(next).ok_or(err)?;
    if !is_low_surrogate(low) {
        return Err(err);
    }
    Ok(0x1_0000 + ((u32::from(high - HIGH_START)) << 10) + u32::from(low - LOW_START))
}
