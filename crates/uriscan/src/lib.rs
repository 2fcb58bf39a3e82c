//! A single-pass, backtrack-free parser for unsigned integer literals and
//! URIs.
//!
//! Readers pull characters from a [`Cursor`], which tracks the 1-based
//! line/column and latches the first failure. Decoded scalars go to a
//! [`Consumer`]; URIs are staged in a [`UriBuilder`] and frozen into an
//! immutable, shareable [`Uri`] whose canonical string drives equality,
//! ordering and hashing.
//!
//! ```rust
//! use uriscan::{Cursor, ErrorKind, parse, read_unsigned_integer};
//!
//! let uri = parse("HTTP://Example.com:8080/a%20b?k=v&k=w#top").unwrap();
//! assert_eq!(uri.as_str(), "http://Example.com:8080/a%20b?k=v&k=w#top");
//! assert_eq!(uri.query().len(), 2);
//!
//! let mut c = Cursor::new("0b1_");
//! let mut bits = 0u8;
//! read_unsigned_integer(&mut c, &mut |x: u8| bits = x);
//! assert_eq!((bits, c.current()), (1, '_'));
//! assert_eq!(c.code(), None::<ErrorKind>);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

pub(crate) use log_debug;
pub(crate) use log_trace;

mod error;
mod options;
mod parser;
mod uri;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, ParseError};
pub use options::ParserOptions;
pub use parser::{
    Consumer, Cursor, Position, UnsignedInt, parse, parse_unsigned, parse_with_options,
    percent, read_unsigned_integer, read_uri,
};
pub use uri::{Authority, Host, Query, Uri, UriBuilder, fnv_hash};
