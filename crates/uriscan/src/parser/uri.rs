//! The URI grammar.
//!
//! ```text
//! uri       := scheme ":" [ "//" authority ] path [ "?" query ] [ "#" fragment ]
//! scheme    := ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
//! authority := [ userinfo "@" ] host [ ":" port ]
//! host      := "[" ip-literal "]" / reg-name
//! query     := [ pair ] *( "&" [ pair ] )
//! pair      := key [ "=" value ]
//! ```
//!
//! Userinfo and a registered name share a character class, so the authority
//! reads one run and only decides what it was once it sees whether `@`
//! follows. Nothing is ever re-read.

use alloc::string::String;
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{
    Cursor, read_unsigned_integer,
    percent::{Component, read_component},
};
use crate::{Authority, ErrorKind, Host, UriBuilder};

/// Reads one URI into `staging`.
///
/// No whitespace is skipped, before or inside the URI. On failure the error
/// is latched in the cursor and `staging` holds whatever was read so far; the
/// caller must discard it. Does nothing if the cursor has already failed.
///
/// ```rust
/// use uriscan::{Cursor, UriBuilder, read_uri};
///
/// let mut staging = UriBuilder::new();
/// let mut c = Cursor::new("mailto:someone@example.com rest");
/// read_uri(&mut c, &mut staging);
/// assert!(c.is_ok());
/// assert_eq!(c.rest(), b" rest");
/// assert_eq!(staging.build().path(), "someone@example.com");
/// ```
pub fn read_uri(cursor: &mut Cursor<'_>, staging: &mut UriBuilder) {
    if cursor.is_ok() {
        let _ = read_parts(cursor, staging);
    }
}

fn read_parts(cursor: &mut Cursor<'_>, staging: &mut UriBuilder) -> Option<()> {
    staging.scheme = read_scheme(cursor)?;
    if cursor.rest().starts_with(b"//") {
        cursor.advance();
        cursor.advance();
        staging.authority = Some(read_authority(cursor)?);
    }
    staging.path = read_component(cursor, Component::Path)?;
    if cursor.accept('?') {
        read_query(cursor, staging)?;
    }
    if cursor.accept('#') {
        staging.fragment = read_component(cursor, Component::Fragment)?;
    }
    Some(())
}

fn read_scheme(cursor: &mut Cursor<'_>) -> Option<String> {
    let mut scheme = String::new();
    match cursor.accept_if(|c| c.is_ascii_alphabetic()) {
        Some(c) => scheme.push(c),
        None => {
            cursor.fail(ErrorKind::InvalidScheme);
            return None;
        }
    }
    while let Some(c) =
        cursor.accept_if(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        scheme.push(c);
    }
    if !cursor.accept(':') {
        cursor.fail(ErrorKind::InvalidScheme);
        return None;
    }
    Some(scheme)
}

fn read_authority(cursor: &mut Cursor<'_>) -> Option<Authority> {
    let mut authority = Authority::default();
    if cursor.peek() == Some('[') {
        authority.host = read_ip_literal(cursor)?;
    } else {
        let run = read_component(cursor, Component::Host)?;
        if cursor.accept('@') {
            authority.userinfo = run;
            authority.host = if cursor.peek() == Some('[') {
                read_ip_literal(cursor)?
            } else {
                Host::from_name(read_component(cursor, Component::Host)?)
            };
        } else {
            authority.host = Host::from_name(run);
        }
    }

    let has_port = cursor.accept(':');
    if has_port {
        if !cursor.current().is_ascii_digit() {
            cursor.fail(ErrorKind::InvalidPort);
            return None;
        }
        read_unsigned_integer(cursor, &mut |port: u16| authority.port = port);
        if !cursor.is_ok() {
            return None;
        }
    }

    match cursor.peek() {
        None | Some('/' | '?' | '#') => Some(authority),
        Some(c) if cursor.options().is_whitespace(c) => Some(authority),
        Some(_) => {
            cursor.fail(if has_port {
                ErrorKind::InvalidPort
            } else {
                ErrorKind::InvalidHost
            });
            None
        }
    }
}

/// `"[" address "]"`, delegated to the `core::net` parsers.
fn read_ip_literal(cursor: &mut Cursor<'_>) -> Option<Host> {
    let start = cursor.position();
    cursor.advance();
    let mut text = String::new();
    while let Some(c) = cursor.accept_if(|c| c.is_ascii_hexdigit() || matches!(c, ':' | '.')) {
        text.push(c);
    }
    if cursor.at_end() {
        cursor.fail(ErrorKind::UnexpectedEof);
        return None;
    }
    if !cursor.accept(']') {
        cursor.fail(ErrorKind::UnexpectedCharacter);
        return None;
    }
    let ip = if let Ok(v6) = text.parse::<Ipv6Addr>() {
        IpAddr::V6(v6)
    } else if let Ok(v4) = text.parse::<Ipv4Addr>() {
        IpAddr::V4(v4)
    } else {
        cursor.fail_at(ErrorKind::InvalidHost, start);
        return None;
    };
    Some(Host::from_ip(ip))
}

fn read_query(cursor: &mut Cursor<'_>, staging: &mut UriBuilder) -> Option<()> {
    loop {
        let key = read_component(cursor, Component::QueryKey)?;
        let has_value = cursor.accept('=');
        let value = if has_value {
            read_component(cursor, Component::QueryValue)?
        } else {
            String::new()
        };
        // `&&`, a trailing `&` and a bare `?` carry no pair.
        if has_value || !key.is_empty() {
            staging.query.push((key, value));
        }
        if !cursor.accept('&') {
            return Some(());
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    fn read(input: &str) -> (Cursor<'_>, UriBuilder) {
        let mut cursor = Cursor::new(input);
        let mut staging = UriBuilder::new();
        read_uri(&mut cursor, &mut staging);
        (cursor, staging)
    }

    #[test]
    fn stops_before_trailing_text() {
        let (c, staging) = read("a:b c");
        assert!(c.is_ok());
        assert_eq!(c.current(), ' ');
        assert_eq!(staging.path, "b");
    }

    #[test]
    fn userinfo_is_decided_by_the_at_sign() {
        let (_, staging) = read("x://u%40v@h");
        let authority = staging.authority.unwrap();
        assert_eq!(authority.userinfo, "u@v");
        assert_eq!(authority.host, Host::Name("h".into()));

        let (_, staging) = read("x://h");
        let authority = staging.authority.unwrap();
        assert_eq!(authority.userinfo, "");
        assert_eq!(authority.host, Host::Name("h".into()));
    }

    #[test]
    fn empty_query_segments_are_dropped() {
        let (_, staging) = read("a:?&k&&=v&");
        assert_eq!(
            staging.query,
            [(String::from("k"), String::new()), (String::new(), String::from("v"))]
        );
    }

    #[rstest]
    #[case::v6("x://[2001:db8::1]", "2001:db8::1")]
    #[case::v4_in_brackets("x://[10.0.0.1]", "10.0.0.1")]
    #[case::v4_mapped("x://[::ffff:10.0.0.1]", "10.0.0.1")]
    #[case::bare_v4("x://10.0.0.1", "10.0.0.1")]
    fn ip_hosts(#[case] input: &str, #[case] expected: &str) {
        let (c, staging) = read(input);
        assert!(c.is_ok());
        let host = staging.authority.unwrap().host;
        assert_eq!(host.as_ip(), Some(expected.parse().unwrap()));
    }

    #[rstest]
    #[case::unclosed("x://[::1", ErrorKind::UnexpectedEof, 9)]
    #[case::bad_char("x://[::g]", ErrorKind::UnexpectedCharacter, 8)]
    #[case::not_an_address("x://[1:2]", ErrorKind::InvalidHost, 5)]
    #[case::empty_brackets("x://[]", ErrorKind::InvalidHost, 5)]
    #[case::garbage_after_host("x://h<", ErrorKind::InvalidHost, 6)]
    #[case::garbage_after_port("x://h:80x", ErrorKind::InvalidPort, 9)]
    #[case::port_without_digits("x://h:/", ErrorKind::InvalidPort, 7)]
    #[case::port_overflow("x://h:65536", ErrorKind::IntegerOverflow, 11)]
    fn authority_errors(#[case] input: &str, #[case] kind: ErrorKind, #[case] column: usize) {
        let (c, _) = read(input);
        let err = c.error().unwrap();
        assert_eq!(err.kind(), kind);
        assert_eq!(err.column(), column);
    }
}
