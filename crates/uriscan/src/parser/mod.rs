//! Single-pass readers over a [`Cursor`].
//!
//! Every reader follows the same contract: it reads forward only, reports a
//! decoded value through a [`Consumer`] or a staging structure, and leaves
//! failures in the cursor's latch. Only the entry points in this module turn
//! the latch into a `Result`.

mod consumer;
mod cursor;
mod numbers;
pub mod percent;
mod uri;

pub use consumer::Consumer;
pub use cursor::{Cursor, Position};
pub use numbers::{UnsignedInt, read_unsigned_integer};
pub use uri::read_uri;

use crate::{ErrorKind, ParseError, ParserOptions, Uri, UriBuilder};

/// Parses `text` as a URI with default options.
///
/// Whitespace around the URI is ignored; anything else after it is an error.
/// The result is rebuilt from its decoded components, so its string form is
/// canonical rather than a copy of the input.
///
/// # Errors
///
/// Returns the first failure with its 1-based line and column.
///
/// ```rust
/// let uri = uriscan::parse("https://user@[::1]:8080/path?x=1#frag").unwrap();
/// assert_eq!(uri.scheme(), "https");
/// assert_eq!(uri.authority().unwrap().port, 8080);
/// assert_eq!(uri.fragment(), "frag");
/// ```
pub fn parse(text: &str) -> Result<Uri, ParseError> {
    parse_with_options(text, ParserOptions::default())
}

/// Parses `text` as a URI.
///
/// # Errors
///
/// Returns the first failure with its 1-based line and column.
pub fn parse_with_options(text: &str, options: ParserOptions) -> Result<Uri, ParseError> {
    let mut cursor = Cursor::with_options(text, options);
    let mut staging = UriBuilder::new();
    cursor.skip_whitespace();
    read_uri(&mut cursor, &mut staging);
    finish(&mut cursor)?;
    Ok(staging.build())
}

/// Reads one unsigned integer literal that spans all of `text` (surrounding
/// whitespace aside).
///
/// # Errors
///
/// Returns the first failure with its 1-based line and column.
///
/// ```rust
/// use uriscan::{ErrorKind, parse_unsigned};
///
/// assert_eq!(parse_unsigned::<u16>(" 0xFFFF "), Ok(u16::MAX));
/// assert_eq!(
///     parse_unsigned::<u8>("12a").unwrap_err().kind(),
///     ErrorKind::TrailingCharacter
/// );
/// ```
pub fn parse_unsigned<T: UnsignedInt>(text: &str) -> Result<T, ParseError> {
    let mut cursor = Cursor::new(text);
    let mut value = T::default();
    read_unsigned_integer(&mut cursor, &mut |x: T| value = x);
    finish(&mut cursor)?;
    Ok(value)
}

fn finish(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    if cursor.is_ok() {
        cursor.skip_whitespace();
        if !cursor.at_end() {
            cursor.fail(ErrorKind::TrailingCharacter);
        }
    }
    match cursor.error() {
        Some(err) => {
            crate::log_debug!("parse failed: {err}");
            Err(err)
        }
        None => Ok(()),
    }
}
