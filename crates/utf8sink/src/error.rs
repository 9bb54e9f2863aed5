use thiserror::Error;

/// Failure of a single encode call, for callers that prefer `Result` over
/// matching on [`EncodeResult`](crate::EncodeResult).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The destination had no room for the next code point.
    #[error("destination buffer too small")]
    Overflow,
    /// An unpaired or mis-ordered surrogate at `position` in the source.
    #[error("malformed UTF-16: unpaired surrogate at code unit {position}")]
    MalformedInput {
        /// Absolute index of the offending code unit.
        position: usize,
    },
}

/// Rejected sink geometry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    #[error("window {offset}+{limit} exceeds buffer length {len}")]
    WindowOutOfBounds {
        offset: usize,
        limit: usize,
        len: usize,
    },
    #[error("limit {limit} exceeds capacity {capacity}")]
    LimitOutOfBounds { limit: usize, capacity: usize },
    #[error("position {position} exceeds limit {limit}")]
    PositionOutOfBounds { position: usize, limit: usize },
}

/// Rejected source view geometry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    #[error("view {offset}+{len} exceeds backing length {backing}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        backing: usize,
    },
}
