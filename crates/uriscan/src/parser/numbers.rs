//! Unsigned integer literals.
//!
//! Grammar (case-insensitive prefixes):
//!
//! ```text
//! literal := ws* "+"? ( "0x" hex+ | "0b" bin+ | "0" oct+ | "0" | dec+ )
//! ```
//!
//! Digits accumulate left to right with checked arithmetic in the target
//! width, so an out-of-range literal is reported instead of wrapping.

use core::fmt::Debug;

use super::{Consumer, Cursor};
use crate::ErrorKind;

/// Fixed-width unsigned integers the numeric reader can produce.
pub trait UnsignedInt: Copy + Default + Eq + Debug {
    /// The largest representable value.
    const MAX: Self;

    /// `self * base + digit`, or `None` if the result does not fit.
    fn checked_mul_add(self, base: u8, digit: u8) -> Option<Self>;
}

macro_rules! impl_unsigned_int {
    ($($t:ty),* $(,)?) => {$(
        impl UnsignedInt for $t {
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn checked_mul_add(self, base: u8, digit: u8) -> Option<Self> {
                self.checked_mul(Self::from(base))?.checked_add(Self::from(digit))
            }
        }
    )*};
}

impl_unsigned_int!(u8, u16, u32, u64, u128, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Base {
    fn radix(self) -> u8 {
        match self {
            Base::Binary => 2,
            Base::Octal => 8,
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }

    /// Value of `c` as a digit in this base.
    fn digit(self, c: char) -> Option<u8> {
        let b = u8::try_from(c).ok()?;
        let v = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return None,
        };
        (v < self.radix()).then_some(v)
    }
}

/// Reads one unsigned integer literal and reports it to `consumer`.
///
/// On success the cursor sits on the first character after the literal. On
/// failure the error is latched in the cursor, which sits on the offending
/// character, and `consumer` is not called. Does nothing if the cursor has
/// already failed.
///
/// ```rust
/// use uriscan::{Cursor, ErrorKind, read_unsigned_integer};
///
/// let mut out = None;
/// let mut c = Cursor::new("0377");
/// read_unsigned_integer(&mut c, &mut |x: u8| out = Some(x));
/// assert_eq!(out, Some(255));
///
/// let mut out = None;
/// let mut c = Cursor::new("0x100");
/// read_unsigned_integer(&mut c, &mut |x: u8| out = Some(x));
/// assert_eq!(out, None);
/// assert_eq!(c.code(), Some(ErrorKind::IntegerOverflow));
/// assert_eq!(c.column(), 5);
/// ```
pub fn read_unsigned_integer<T, C>(cursor: &mut Cursor<'_>, consumer: &mut C)
where
    T: UnsignedInt,
    C: Consumer<T> + ?Sized,
{
    if !cursor.is_ok() {
        return;
    }
    // The sign is purely syntactic for unsigned targets.
    cursor.consume('+');
    if cursor.peek() == Some('-') {
        cursor.fail(ErrorKind::MalformedInteger);
        return;
    }

    let mut acc = T::default();
    let mut digits = 0usize;
    let base = if cursor.accept('0') {
        match cursor.current() {
            'x' | 'X' => {
                cursor.advance();
                Base::Hexadecimal
            }
            'b' | 'B' => {
                cursor.advance();
                Base::Binary
            }
            c if c.is_ascii_digit() => {
                digits = 1;
                Base::Octal
            }
            _ => {
                consumer.value(acc);
                return;
            }
        }
    } else {
        Base::Decimal
    };

    loop {
        let c = cursor.current();
        let Some(d) = base.digit(c) else {
            // `09` or `0b12` is a typo, not the end of the literal.
            if digits == 0 || c.is_ascii_digit() {
                cursor.fail(ErrorKind::MalformedInteger);
                return;
            }
            break;
        };
        let Some(next) = acc.checked_mul_add(base.radix(), d) else {
            // The offending digit stays unread.
            cursor.fail(ErrorKind::IntegerOverflow);
            return;
        };
        acc = next;
        digits += 1;
        cursor.advance();
    }

    consumer.value(acc);
}
