/// Configuration options for the cursor and the grammars built on it.
///
/// # Examples
///
/// ```rust
/// use uriscan::{ParserOptions, parse_with_options};
///
/// let options = ParserOptions {
///     allow_unicode_whitespace: true,
///     ..Default::default()
/// };
/// let uri = parse_with_options("\u{3000}http://example.com\u{3000}", options).unwrap();
/// assert_eq!(uri.as_str(), "http://example.com");
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether `skip_whitespace` recognizes any Unicode whitespace.
    ///
    /// By default only ASCII whitespace is skipped: space (U+0020), horizontal
    /// tab (U+0009), line feed (U+000A), vertical tab (U+000B), form feed
    /// (U+000C), and carriage return (U+000D).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on the first latched error instead of reporting it.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl ParserOptions {
    /// Whitespace classification used by the cursor.
    #[inline]
    pub(crate) fn is_whitespace(&self, c: char) -> bool {
        if self.allow_unicode_whitespace {
            c.is_whitespace()
        } else {
            matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
        }
    }
}
