/// Configuration for [`Utf8Encoder`](crate::Utf8Encoder).
///
/// # Examples
///
/// ```rust
/// use utf8sink::{EncoderOptions, Utf8Encoder};
///
/// let encoder = Utf8Encoder::new(EncoderOptions {
///     ascii_fast_path: false,
/// });
/// assert!(!encoder.options().ascii_fast_path);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Whether to run the lock-step ASCII loop before the general loop.
    ///
    /// The output is identical either way; turning it off is only useful for
    /// measuring or testing the general loop on its own.
    ///
    /// # Default
    ///
    /// `true`
    pub ascii_fast_path: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            ascii_fast_path: true,
        }
    }
}
