/// A sink for exactly one decoded value.
///
/// Readers report through a `Consumer` and keep errors in the cursor, so a
/// consumer never has to deal with failure. Closures work out of the box:
///
/// ```rust
/// use uriscan::{Cursor, read_unsigned_integer};
///
/// let mut port = 0u16;
/// let mut c = Cursor::new("8080");
/// read_unsigned_integer(&mut c, &mut |x: u16| port = x);
/// assert_eq!(port, 8080);
/// ```
pub trait Consumer<T> {
    /// Accepts the decoded value.
    fn value(&mut self, x: T);
}

impl<T, F: FnMut(T)> Consumer<T> for F {
    #[inline]
    fn value(&mut self, x: T) {
        self(x);
    }
}
