use thiserror::Error;

/// A failure reported by the cursor, with the 1-based position of the
/// character that caused it.
///
/// ```rust
/// use uriscan::{ErrorKind, parse};
///
/// let err = parse("not a uri").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidScheme);
/// assert_eq!((err.line(), err.column()), (1, 4));
/// assert_eq!(err.to_string(), "invalid scheme at 1:4");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl ParseError {
    /// Creates an error for `kind` at the given 1-based position.
    #[must_use]
    pub fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    /// The latched failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 1-based line of the offending character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the offending character, counted in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

/// What went wrong. Success is the absence of an `ErrorKind`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A digit that is invalid for the detected base, or no digits at all.
    #[error("malformed integer")]
    MalformedInteger,
    /// The literal does not fit into the requested integer width.
    #[error("integer overflow")]
    IntegerOverflow,
    /// A required token such as `]` was missing.
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// The input ended inside a production, e.g. an unclosed `[`.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// The grammar finished before the input did.
    #[error("trailing character")]
    TrailingCharacter,
    /// A `%` not followed by two hex digits, or escapes that do not decode to
    /// UTF-8.
    #[error("invalid percent escape")]
    InvalidPercentEscape,
    /// The scheme is empty, starts with a non-letter, or lacks its `:`.
    #[error("invalid scheme")]
    InvalidScheme,
    /// A `:` without a port number, or garbage after the port.
    #[error("invalid port")]
    InvalidPort,
    /// A bracketed literal that is not an IP address.
    #[error("invalid host")]
    InvalidHost,
}
