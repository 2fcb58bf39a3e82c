//! Cursor: position-tracking reader over a finite input.
//!
//! What it does
//! - Decodes UTF‑8 scalars from an immutable byte slice with `current()` /
//!   `advance()` while maintaining the byte offset and 1-based `line/column`.
//! - Offers the one whitespace‑tolerant matching primitive, `consume()`, plus a
//!   strict `accept()` for grammars that must not skip whitespace.
//! - Holds the error latch shared by every reader built on top of it.
//!
//! Invariants
//! - The offset never regresses and always sits on a scalar boundary.
//! - `line/column` describe the character at the offset, or the synthetic
//!   position one past the last character.
//! - The latch keeps the first failure and its position; it is never cleared.
//! - Invalid UTF‑8 decodes as U+FFFD, one maximal invalid prefix at a time.
//!
//! Example
//! ```rust
//! use uriscan::Cursor;
//!
//! let mut c = Cursor::new("a\nb");
//! assert_eq!(c.current(), 'a');
//! assert_eq!(c.advance(), '\n');
//! assert_eq!(c.advance(), 'b');
//! assert_eq!((c.line(), c.column()), (2, 1));
//! assert_eq!(c.advance(), '\0');
//! assert!(c.at_end());
//! ```

use crate::{ErrorKind, ParseError, ParserOptions};

/// A location in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, counted in characters).
    pub column: usize,
}

impl Position {
    /// The position of the first character.
    #[inline]
    #[must_use]
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A single-pass reader over a character sequence.
///
/// Typical loop:
/// ```rust
/// use uriscan::{Cursor, ErrorKind};
///
/// let mut c = Cursor::new("  abc;");
/// c.skip_whitespace();
/// let mut word = String::new();
/// while c.current().is_ascii_alphabetic() {
///     word.push(c.current());
///     c.advance();
/// }
/// if !c.consume(';') {
///     c.fail(ErrorKind::UnexpectedCharacter);
/// }
/// assert_eq!(word, "abc");
/// assert!(c.is_ok() && c.at_end());
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    input: &'src [u8],
    pos: Position,
    error: Option<(ErrorKind, Position)>,
    options: ParserOptions,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at the start of `input` with default options.
    pub fn new<S: AsRef<[u8]> + ?Sized>(input: &'src S) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    /// Creates a cursor at the start of `input`.
    pub fn with_options<S: AsRef<[u8]> + ?Sized>(input: &'src S, options: ParserOptions) -> Self {
        Self {
            input: input.as_ref(),
            pos: Position::start(),
            error: None,
            options,
        }
    }

    /// The options this cursor was created with.
    #[must_use]
    pub fn options(&self) -> ParserOptions {
        self.options
    }

    // Decode the scalar at the current offset.
    #[inline]
    fn decode(&self) -> Option<(char, usize)> {
        let rest = self.input.get(self.pos.offset..)?;
        if rest.is_empty() {
            return None;
        }
        let (ch, len) = bstr::decode_utf8(rest);
        if len == 0 {
            return None;
        }
        Some((ch.unwrap_or('\u{FFFD}'), len))
    }

    /// The character at the current position, or `None` at the end.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.decode().map(|(ch, _)| ch)
    }

    /// The character at the current position, or `'\0'` at the end.
    #[inline]
    #[must_use]
    pub fn current(&self) -> char {
        self.peek().unwrap_or('\0')
    }

    /// Steps over one character and returns the new current character.
    ///
    /// Stays put (and keeps returning `'\0'`) once the end is reached.
    #[inline]
    pub fn advance(&mut self) -> char {
        let Some((ch, len)) = self.decode() else {
            return '\0';
        };
        self.pos.offset += len;
        self.bump_pos(ch);
        self.current()
    }

    #[inline]
    fn bump_pos(&mut self, departed: char) {
        if departed == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
    }

    /// Whether every character has been read.
    #[inline]
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos.offset >= self.input.len()
    }

    /// Advances past a run of whitespace. No-op at the end.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !self.options.is_whitespace(c) {
                break;
            }
            self.advance();
        }
    }

    /// Skips whitespace, then steps over `expected` if it is the current
    /// character. Returns whether it did.
    pub fn consume(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.accept(expected)
    }

    /// Steps over `expected` if it is the current character, without skipping
    /// whitespace first.
    #[inline]
    pub fn accept(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Steps over the current character if it satisfies `pred` and returns it.
    #[inline]
    pub fn accept_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<char> {
        let ch = self.peek().filter(|&c| pred(c))?;
        self.advance();
        Some(ch)
    }

    /// Bytes from `start` (a byte offset previously read from
    /// [`position`](Self::position)) up to the current position.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &'src [u8] {
        self.input.get(start..self.pos.offset).unwrap_or_default()
    }

    /// The unread remainder of the input.
    #[must_use]
    pub fn rest(&self) -> &'src [u8] {
        self.input.get(self.pos.offset..).unwrap_or_default()
    }

    /// Latches `kind` at the current position unless an earlier failure is
    /// already latched.
    pub fn fail(&mut self, kind: ErrorKind) {
        self.fail_at(kind, self.pos);
    }

    /// Like [`fail`](Self::fail), but reports an earlier position, e.g. the
    /// start of a token that only turned out to be invalid once read.
    pub fn fail_at(&mut self, kind: ErrorKind, at: Position) {
        #[cfg(any(test, feature = "fuzzing"))]
        if self.options.panic_on_error {
            panic!("{kind} at {}:{}", at.line, at.column);
        }
        if self.error.is_none() {
            crate::log_trace!("latched {kind} at {}:{}", at.line, at.column);
            self.error = Some((kind, at));
        }
    }

    /// The latched failure, if any.
    #[inline]
    #[must_use]
    pub fn code(&self) -> Option<ErrorKind> {
        self.error.map(|(kind, _)| kind)
    }

    /// `true` while nothing has failed.
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The latched failure with the position it was latched at.
    #[must_use]
    pub fn error(&self) -> Option<ParseError> {
        self.error
            .map(|(kind, at)| ParseError::new(kind, at.line, at.column))
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Current 1-based line.
    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        self.pos.line
    }

    /// Current 1-based column.
    #[inline]
    #[must_use]
    pub fn column(&self) -> usize {
        self.pos.column
    }
}

#[cfg(test)]
mod tests;
