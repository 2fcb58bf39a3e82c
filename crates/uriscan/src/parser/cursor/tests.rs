use super::*;

#[test]
fn starts_at_line_one_column_one() {
    let c = Cursor::new("xyz");
    assert_eq!(c.position(), Position::start());
    assert_eq!(c.current(), 'x');
    assert!(c.is_ok());
    assert_eq!(c.code(), None);
}

#[test]
fn advance_tracks_columns_and_lines() {
    let mut c = Cursor::new("ab\ncd");
    assert_eq!(c.advance(), 'b');
    assert_eq!((c.line(), c.column()), (1, 2));
    assert_eq!(c.advance(), '\n');
    assert_eq!((c.line(), c.column()), (1, 3));
    // Departing the newline moves to the next line.
    assert_eq!(c.advance(), 'c');
    assert_eq!((c.line(), c.column()), (2, 1));
    assert_eq!(c.advance(), 'd');
    assert_eq!(c.advance(), '\0');
    assert_eq!((c.line(), c.column()), (2, 3));
    assert_eq!(c.position().offset, 5);
}

#[test]
fn advance_at_end_is_idempotent() {
    let mut c = Cursor::new("a");
    c.advance();
    assert!(c.at_end());
    let before = c.position();
    for _ in 0..3 {
        assert_eq!(c.advance(), '\0');
        assert_eq!(c.current(), '\0');
    }
    assert_eq!(c.position(), before);
}

#[test]
fn empty_input_is_at_end() {
    let mut c = Cursor::new("");
    assert!(c.at_end());
    assert_eq!(c.peek(), None);
    c.skip_whitespace();
    assert!(!c.consume('x'));
    assert_eq!(c.position(), Position::start());
}

#[test]
fn multibyte_scalars_count_as_one_column() {
    let mut c = Cursor::new("å€z");
    assert_eq!(c.advance(), '€');
    assert_eq!(c.position().offset, 2);
    assert_eq!(c.advance(), 'z');
    assert_eq!(c.position().offset, 5);
    assert_eq!(c.column(), 3);
}

#[test]
fn invalid_utf8_decodes_as_replacement() {
    let bytes: &[u8] = b"a\xFFb";
    let mut c = Cursor::new(bytes);
    assert_eq!(c.advance(), '\u{FFFD}');
    assert_eq!(c.advance(), 'b');
    assert_eq!(c.column(), 3);
}

#[test]
fn consume_skips_whitespace_then_matches() {
    let mut c = Cursor::new(" \t\n :x");
    assert!(c.consume(':'));
    assert_eq!(c.current(), 'x');
    assert_eq!((c.line(), c.column()), (2, 3));
}

#[test]
fn consume_mismatch_leaves_char_in_place() {
    let mut c = Cursor::new("  ;");
    assert!(!c.consume(':'));
    // Whitespace is gone, the mismatching character is not.
    assert_eq!(c.current(), ';');
    assert_eq!(c.column(), 3);
}

#[test]
fn accept_does_not_skip_whitespace() {
    let mut c = Cursor::new(" :");
    assert!(!c.accept(':'));
    assert_eq!(c.column(), 1);
    assert_eq!(c.accept_if(char::is_whitespace), Some(' '));
    assert!(c.accept(':'));
    assert!(c.at_end());
}

#[test]
fn unicode_whitespace_is_opt_in() {
    let mut strict = Cursor::new("\u{3000}x");
    strict.skip_whitespace();
    assert_eq!(strict.current(), '\u{3000}');

    let options = ParserOptions {
        allow_unicode_whitespace: true,
        ..Default::default()
    };
    let mut lenient = Cursor::with_options("\u{3000}x", options);
    lenient.skip_whitespace();
    assert_eq!(lenient.current(), 'x');
}

#[test]
fn first_failure_wins() {
    let mut c = Cursor::new("abc");
    c.advance();
    c.fail(ErrorKind::InvalidScheme);
    c.advance();
    c.fail(ErrorKind::UnexpectedCharacter);
    assert_eq!(c.code(), Some(ErrorKind::InvalidScheme));
    let err = c.error().unwrap();
    assert_eq!((err.line(), err.column()), (1, 2));
    // Reading continues to report positions after a failure.
    assert_eq!(c.column(), 3);
}

#[test]
fn slices_cover_consumed_bytes() {
    let mut c = Cursor::new("key=value");
    let start = c.position().offset;
    while c.accept_if(|ch| ch != '=').is_some() {}
    assert_eq!(c.slice_from(start), b"key");
    assert_eq!(c.rest(), b"=value");
}

#[test]
#[should_panic(expected = "invalid host at 1:1")]
fn panic_on_error_panics() {
    let options = ParserOptions {
        panic_on_error: true,
        ..Default::default()
    };
    let mut c = Cursor::with_options("[", options);
    c.fail(ErrorKind::InvalidHost);
}

#[test]
fn fail_at_reports_an_earlier_position() {
    let mut c = Cursor::new("[1:2]");
    let start = c.position();
    while c.advance() != '\0' {}
    c.fail_at(ErrorKind::InvalidHost, start);
    c.fail(ErrorKind::TrailingCharacter);
    let err = c.error().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidHost);
    assert_eq!((err.line(), err.column()), (1, 1));
    assert_eq!(c.column(), 6);
}
