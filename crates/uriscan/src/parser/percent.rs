//! Percent-encoding and the per-component character classes.
//!
//! Each URI component has a set of ASCII characters that may appear raw. The
//! grammar accepts exactly those (plus `%XX` escapes and non-ASCII text) and
//! the serializer leaves exactly those unescaped, so decoding and re-encoding
//! is stable.

use alloc::{string::String, vec::Vec};

use super::Cursor;
use crate::ErrorKind;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// The URI components, each with its own set of raw characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// `userinfo` before `@`. A raw `:` is not allowed.
    Userinfo,
    /// A textual host (registered name).
    Host,
    /// The path, including `/` separators.
    Path,
    /// A query key; `&`, `=` and `#` must be escaped.
    QueryKey,
    /// A query value; `&` and `#` must be escaped.
    QueryValue,
    /// The fragment after `#`.
    Fragment,
}

#[inline]
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

#[inline]
fn is_sub_delim(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

impl Component {
    /// Whether the ASCII byte `b` may appear unescaped in this component.
    #[must_use]
    pub fn allows(self, b: u8) -> bool {
        let base = is_unreserved(b) || is_sub_delim(b);
        match self {
            Component::Userinfo | Component::Host => base,
            Component::Path => base || matches!(b, b':' | b'@' | b'/'),
            Component::QueryKey => {
                (base && b != b'&' && b != b'=') || matches!(b, b':' | b'@' | b'/' | b'?')
            }
            Component::QueryValue => {
                (base && b != b'&') || matches!(b, b':' | b'@' | b'/' | b'?')
            }
            Component::Fragment => base || matches!(b, b':' | b'@' | b'/' | b'?'),
        }
    }
}

/// Appends `s` to `out`, escaping every byte `component` does not allow raw.
///
/// Non-ASCII text is escaped byte by byte in its UTF‑8 form.
///
/// ```rust
/// use uriscan::percent::{Component, append_percent_encoded};
///
/// let mut out = String::new();
/// append_percent_encoded(&mut out, "a b/ü?", Component::Path);
/// assert_eq!(out, "a%20b/%C3%BC%3F");
/// ```
pub fn append_percent_encoded(out: &mut String, s: &str, component: Component) {
    for &b in s.as_bytes() {
        if b.is_ascii() && component.allows(b) {
            out.push(char::from(b));
        } else {
            push_escape(out, b);
        }
    }
}

#[inline]
pub(crate) fn push_escape(out: &mut String, b: u8) {
    out.push('%');
    out.push(char::from(HEX_UPPER[usize::from(b >> 4)]));
    out.push(char::from(HEX_UPPER[usize::from(b & 0x0F)]));
}

#[inline]
fn hex_value(c: char) -> Option<u8> {
    c.to_digit(16).and_then(|d| u8::try_from(d).ok())
}

/// Reads a run of `component` characters, decoding escapes.
///
/// Stops at the first character the component does not allow raw (it is left
/// unread). Returns `None` after latching `InvalidPercentEscape` when an
/// escape is malformed or the decoded bytes are not UTF‑8.
pub(crate) fn read_component(cursor: &mut Cursor<'_>, component: Component) -> Option<String> {
    let mut bytes = Vec::new();
    while let Some(c) = cursor.peek() {
        if c == '%' {
            cursor.advance();
            let Some(hi) = hex_value(cursor.current()) else {
                cursor.fail(ErrorKind::InvalidPercentEscape);
                return None;
            };
            cursor.advance();
            let Some(lo) = hex_value(cursor.current()) else {
                cursor.fail(ErrorKind::InvalidPercentEscape);
                return None;
            };
            cursor.advance();
            bytes.push((hi << 4) | lo);
        } else if let Some(b) = u8::try_from(c).ok().filter(u8::is_ascii) {
            if !component.allows(b) {
                break;
            }
            bytes.push(b);
            cursor.advance();
        } else {
            if cursor.options().is_whitespace(c) {
                break;
            }
            let mut tmp = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
            cursor.advance();
        }
    }
    if let Ok(text) = String::from_utf8(bytes) {
        Some(text)
    } else {
        cursor.fail(ErrorKind::InvalidPercentEscape);
        None
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rstest::*;

    use super::*;

    #[rstest]
    #[case::userinfo_colon(Component::Userinfo, "a:b", "a%3Ab")]
    #[case::host_at(Component::Host, "x@y", "x%40y")]
    #[case::path_keeps_slashes(Component::Path, "/a:b@c", "/a:b@c")]
    #[case::key_escapes_equals(Component::QueryKey, "k=v&w", "k%3Dv%26w")]
    #[case::value_keeps_equals(Component::QueryValue, "k=v&w", "k=v%26w")]
    #[case::fragment_escapes_hash(Component::Fragment, "a#b?c", "a%23b?c")]
    #[case::percent_is_escaped(Component::Path, "100%", "100%25")]
    #[case::non_ascii(Component::Fragment, "é", "%C3%A9")]
    fn encodes(#[case] component: Component, #[case] input: &str, #[case] expected: &str) {
        let mut out = String::new();
        append_percent_encoded(&mut out, input, component);
        assert_eq!(out, expected);
    }

    #[rstest]
    #[case::plain("abc", "abc", 4)]
    #[case::escapes("a%20b%2f", "a b/", 9)]
    #[case::lowercase_hex("%c3%a9", "é", 7)]
    #[case::stops_at_query("p/q?x", "p/q", 4)]
    #[case::raw_unicode("ü/x", "ü/x", 4)]
    fn decodes(#[case] input: &str, #[case] expected: &str, #[case] column: usize) {
        let mut c = Cursor::new(input);
        let out = read_component(&mut c, Component::Path);
        assert_eq!(out.as_deref(), Some(expected));
        assert_eq!(c.column(), column);
        assert!(c.is_ok());
    }

    #[rstest]
    #[case::missing_digits("%", 2)]
    #[case::one_digit("%4", 3)]
    #[case::bad_digit("%4g", 3)]
    #[case::bad_first_digit("a%zz", 3)]
    #[case::not_utf8("%FF", 4)]
    fn rejects_bad_escapes(#[case] input: &str, #[case] column: usize) {
        let mut c = Cursor::new(input);
        assert_eq!(read_component(&mut c, Component::Path), None);
        let err = c.error().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidPercentEscape);
        assert_eq!(err.column(), column);
    }
}
